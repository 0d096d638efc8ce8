//! Appointment entity for SeaORM. Standalone table, no foreign keys.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: Date,
    pub client_name: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for gazette_core::domain::Appointment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            client_name: model.client_name,
            message: model.message,
        }
    }
}

impl From<gazette_core::domain::Appointment> for ActiveModel {
    fn from(appointment: gazette_core::domain::Appointment) -> Self {
        Self {
            id: if appointment.id == 0 {
                NotSet
            } else {
                Set(appointment.id)
            },
            date: Set(appointment.date),
            client_name: Set(appointment.client_name),
            message: Set(appointment.message),
        }
    }
}
