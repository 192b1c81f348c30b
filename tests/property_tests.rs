//! Property-based tests for the textual codecs and id generation.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Coordinates survive the brace form for every in-bounds x
//! - Locations survive the delimited form
//! - People survive the brace form, quotes and braces in text included
//! - Ids from one generator strictly increase
//! - Timestamps survive the fixed pattern at millisecond precision

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::DateTime;
use proptest::prelude::*;
use stockroom::io::codec::{brace, delimited, timestamp};
use stockroom::io::row;
use stockroom::{
    Color, Coordinates, Country, IdGenerator, Location, NamedEnum, Person, Product, ProductId,
    UnitOfMeasure,
};

fn location() -> impl Strategy<Value = Location> {
    (
        prop::option::of(0i64..=i64::MAX),
        prop::option::of(0i32..=i32::MAX),
        "[^;]{1,24}",
    )
        .prop_map(|(x, y, name)| Location::new(x, y, name))
        .prop_filter("valid location", Location::validate)
}

fn person() -> impl Strategy<Value = Person> {
    (
        "[ -~]{1,30}",
        prop::option::of("[ -~]{1,42}"),
        prop::option::of(prop::sample::select(Color::ALL.to_vec())),
        prop::sample::select(Country::ALL.to_vec()),
        prop::option::of(location()),
    )
        .prop_map(|(name, passport, hair, nationality, location)| {
            Person::new(name, passport, hair, nationality, location)
        })
}

proptest! {
    /// Property: Coordinates round-trip through the brace form.
    #[test]
    fn prop_coordinates_brace_round_trip(x in -453i32..=i32::MAX, y in -1.0e12f64..1.0e12) {
        let coordinates = Coordinates::new(x, y);
        let decoded: Coordinates = brace::decode(&brace::encode(&coordinates)).unwrap();
        prop_assert_eq!(decoded, coordinates);
    }

    /// Property: x at or below the bound is always rejected.
    #[test]
    fn prop_coordinates_out_of_bounds_rejected(x in i32::MIN..=-454i32) {
        let text = format!("Coordinates{{x={x}, y=0.0}}");
        prop_assert!(brace::decode::<Coordinates>(&text).is_err());
    }

    /// Property: every valid Location without `;` in its name round-trips
    /// through the delimited form.
    #[test]
    fn prop_location_delimited_round_trip(location in location()) {
        let text = delimited::encode(&location).unwrap();
        let decoded: Location = delimited::decode(&text).unwrap();
        prop_assert_eq!(decoded, location);
    }

    /// Property: Person round-trips through the brace form.
    #[test]
    fn prop_person_brace_round_trip(person in person()) {
        let decoded: Person = brace::decode(&person.to_string()).unwrap();
        prop_assert_eq!(decoded, person);
    }

    /// Property: ids from one generator strictly increase.
    #[test]
    fn prop_ids_strictly_increase(start in 1i64..1_000_000, n in 1usize..200) {
        let ids = IdGenerator::starting_at(start);
        let issued: Vec<ProductId> = (0..n).map(|_| ids.next().unwrap()).collect();
        prop_assert_eq!(issued[0], ProductId::new(start));
        prop_assert!(issued.windows(2).all(|w| w[0] < w[1]));
    }

    /// Property: advancing past a loaded id never reissues it.
    #[test]
    fn prop_advance_past_skips_loaded_ids(loaded in prop::collection::vec(1i64..10_000, 1..20)) {
        let ids = IdGenerator::new();
        for id in &loaded {
            ids.advance_past(ProductId::new(*id));
        }
        let max = loaded.iter().copied().max().unwrap();
        prop_assert_eq!(ids.next().unwrap(), ProductId::new(max + 1));
    }

    /// Property: ids near the top of the range are issued once, then exhaustion is an error.
    #[test]
    fn prop_ids_never_wrap(gap in 0i64..16) {
        let ids = IdGenerator::new();
        ids.advance_past(ProductId::new(i64::MAX - gap));
        for _ in 0..gap {
            prop_assert!(ids.next().unwrap().is_valid());
        }
        prop_assert!(ids.next().is_err());
        prop_assert!(ids.next().is_err());
    }

    /// Property: timestamps round-trip at millisecond precision.
    #[test]
    fn prop_timestamp_round_trip(millis in 0i64..4_102_444_800_000) {
        let at = DateTime::from_timestamp_millis(millis).unwrap();
        prop_assert_eq!(timestamp::parse(&timestamp::format(&at)).unwrap(), at);
    }

    /// Property: a valid product survives the row form.
    #[test]
    fn prop_product_row_round_trip(
        id in 1i64..i64::MAX,
        name in "[ -~]*[!-~][ -~]*",
        x in -453i32..10_000,
        price in prop::option::of(1i32..=i32::MAX),
        unit in prop::sample::select(UnitOfMeasure::ALL.to_vec()),
        owner in prop::option::of(person()),
        millis in 0i64..4_102_444_800_000,
    ) {
        let product = Product::with_id(
            ProductId::new(id),
            name,
            Coordinates::new(x, 0.25),
            DateTime::from_timestamp_millis(millis).unwrap(),
            price,
            Some(unit),
            owner,
        );
        prop_assume!(product.owner.as_ref().is_none_or(Person::validate));

        let cells = row::to_row(&product).unwrap();
        prop_assert_eq!(row::from_row(&cells).unwrap(), product);
    }
}
