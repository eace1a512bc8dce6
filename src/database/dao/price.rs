use super::Result;
use crate::database::model::price::Price;
use crate::database::schema::price::dsl::{amount, code, id, price, price_type, year};
use diesel::prelude::*;
use dto::price::PriceUpdate;

/// Prices of a year, in the order they have been created.
pub fn retrieve_prices(
    connection: &mut SqliteConnection,
    target_year: i32,
) -> Result<Vec<dto::price::Price>> {
    let results = price
        .filter(year.eq(target_year))
        .order(id.asc())
        .select(Price::as_select())
        .load(connection)?;

    results
        .into_iter()
        .map(dto::price::Price::try_from)
        .collect()
}

pub fn count_prices(connection: &mut SqliteConnection, target_year: i32) -> Result<i64> {
    Ok(price
        .filter(year.eq(target_year))
        .count()
        .get_result(connection)?)
}

/// Create or replace the prices of a year.
/// An existing (year, type, code) price only has its amount updated.
pub fn upsert_prices(
    connection: &mut SqliteConnection,
    target_year: i32,
    updates: &[PriceUpdate],
) -> Result<usize> {
    connection.transaction(|connection| {
        let mut count = 0;
        for update in updates {
            count += diesel::insert_into(price)
                .values((
                    year.eq(target_year),
                    price_type.eq(update.price_type().code()),
                    code.eq(update.code()),
                    amount.eq(*update.amount()),
                ))
                .on_conflict((year, price_type, code))
                .do_update()
                .set(amount.eq(*update.amount()))
                .execute(connection)?;
        }

        Ok(count)
    })
}

pub fn insert_prices(
    connection: &mut SqliteConnection,
    prices: &[dto::price::Price],
) -> Result<usize> {
    if prices.is_empty() {
        return Ok(0);
    }

    let prices = prices
        .iter()
        .map(|new_price| {
            (
                year.eq(*new_price.year()),
                price_type.eq(new_price.price_type().code()),
                code.eq(new_price.code()),
                amount.eq(*new_price.amount()),
            )
        })
        .collect::<Vec<_>>();

    Ok(diesel::insert_into(price).values(&prices).execute(connection)?)
}

#[cfg(test)]
pub mod tests {
    use crate::database::dao::price::insert_prices;
    use diesel::SqliteConnection;
    use dto::price::Price;
    use dto::price::tests::get_test_prices;

    pub fn populate_db(connection: &mut SqliteConnection, year: i32) -> Vec<Price> {
        let prices = get_test_prices(year);
        insert_prices(connection, &prices).unwrap();

        prices
    }

    mod retrieve_prices {
        use crate::database::dao::price::retrieve_prices;
        use crate::database::dao::price::tests::populate_db;
        use crate::database::with_temp_database;
        use dto::price::tests::TEST_YEAR;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let expected_prices = populate_db(&mut connection, TEST_YEAR);
                populate_db(&mut connection, TEST_YEAR - 1);

                let result = retrieve_prices(&mut connection, TEST_YEAR).unwrap();
                assert_eq!(expected_prices, result);
            })
        }

        #[test]
        fn success_when_empty() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();

                let result = retrieve_prices(&mut connection, TEST_YEAR).unwrap();
                assert!(result.is_empty());
            })
        }
    }

    mod count_prices {
        use crate::database::dao::price::count_prices;
        use crate::database::dao::price::tests::populate_db;
        use crate::database::with_temp_database;
        use dto::price::tests::TEST_YEAR;

        #[test]
        fn success() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                let prices = populate_db(&mut connection, TEST_YEAR);

                assert_eq!(
                    prices.len() as i64,
                    count_prices(&mut connection, TEST_YEAR).unwrap()
                );
                assert_eq!(0, count_prices(&mut connection, TEST_YEAR + 1).unwrap());
            })
        }
    }

    mod upsert_prices {
        use crate::database::dao::price::tests::populate_db;
        use crate::database::dao::price::{retrieve_prices, upsert_prices};
        use crate::database::with_temp_database;
        use dto::price::tests::{TEST_YEAR, get_test_price_updates, get_test_prices};
        use dto::price::{Price, PriceType, PriceUpdate};

        #[test]
        fn should_insert_new_prices() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();

                let result =
                    upsert_prices(&mut connection, TEST_YEAR, &get_test_price_updates()).unwrap();
                assert_eq!(7, result);

                let prices = retrieve_prices(&mut connection, TEST_YEAR).unwrap();
                assert_eq!(get_test_prices(TEST_YEAR), prices);
            })
        }

        #[test]
        fn should_update_existing_price_only() {
            with_temp_database(|pool| {
                let mut connection = pool.get().unwrap();
                populate_db(&mut connection, TEST_YEAR);
                let updates = vec![PriceUpdate::new(
                    PriceType::Membership,
                    "GOLF".to_owned(),
                    75.0,
                )];

                upsert_prices(&mut connection, TEST_YEAR, &updates).unwrap();

                let prices = retrieve_prices(&mut connection, TEST_YEAR).unwrap();
                assert_eq!(7, prices.len());
                assert_eq!(
                    &Price::new(TEST_YEAR, PriceType::Membership, "GOLF".to_owned(), 75.0),
                    prices.first().unwrap()
                );
                assert_eq!(&get_test_prices(TEST_YEAR)[1..], &prices[1..]);
            })
        }
    }
}
