//! Randomized checks of date ordering and conversions.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relcore::datum::{
    is_valid_date, pack_date, unpack_date, AttrType, Column, Value, MAX_YEAR, MIN_YEAR,
};

fn random_date(rng: &mut StdRng) -> (i32, i32, i32) {
    loop {
        let year = rng.gen_range(MIN_YEAR..=MAX_YEAR);
        let month = rng.gen_range(1..=12);
        let day = rng.gen_range(1..=31);
        if is_valid_date(year, month, day) {
            return (year, month, day);
        }
    }
}

#[test]
fn test_date_order_matches_calendar_order() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..2000 {
        let a = random_date(&mut rng);
        let b = random_date(&mut rng);
        let left = Value::date(a.0, a.1, a.2).unwrap();
        let right = Value::date(b.0, b.1, b.2).unwrap();
        assert_eq!(left.compare(&right), Some(a.cmp(&b)), "{a:?} vs {b:?}");
    }
}

#[test]
fn test_display_form_compares_equal_to_date() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let (y, m, d) = random_date(&mut rng);
        let date = Value::date(y, m, d).unwrap();
        let text = date.cast_to(AttrType::Chars).unwrap();
        assert_eq!(date.compare(&text), Some(Ordering::Equal));
        assert_eq!(text.cast_to(AttrType::Dates).unwrap(), date);
        assert_eq!(unpack_date(pack_date(y, m, d)), (y, m, d));
    }
}

#[test]
fn test_column_compare_agrees_with_value_compare() {
    let mut rng = StdRng::seed_from_u64(99);
    let values: Vec<Value> = (0..64)
        .map(|_| {
            let (y, m, d) = random_date(&mut rng);
            Value::date(y, m, d).unwrap()
        })
        .collect();
    let column = Column::from_values(AttrType::Dates, 4, &values).unwrap();
    for _ in 0..500 {
        let i = rng.gen_range(0..values.len());
        let j = rng.gen_range(0..values.len());
        assert_eq!(column.compare(&column, i, j), values[i].compare(&values[j]));
    }
}
