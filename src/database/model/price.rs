use crate::database::error::DatabaseError;
use diesel::prelude::*;
use dto::price::PriceType;
use std::str::FromStr;

#[derive(Queryable, Selectable, Debug, PartialEq)]
#[diesel(table_name = crate::database::schema::price)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct Price {
    id: i32,
    year: i32,
    price_type: String,
    code: String,
    amount: f64,
}

impl TryFrom<Price> for dto::price::Price {
    type Error = DatabaseError;

    fn try_from(value: Price) -> Result<Self, Self::Error> {
        Ok(dto::price::Price::new(
            value.year,
            PriceType::from_str(&value.price_type)?,
            value.code,
            value.amount,
        ))
    }
}
