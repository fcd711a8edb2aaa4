//! Ledger behavior through the public library API

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use bilancio_cli::codec::{decode_csv, decode_text, encode_csv, encode_text, DecodeMode, Format};
use bilancio_cli::ledger::LedgerStore;
use bilancio_cli::models::Movement;
use bilancio_cli::storage::LedgerFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stipendio() -> Movement {
    Movement::income(date(2024, 1, 1), "Stipendio", dec!(1500.00)).unwrap()
}

fn affitto() -> Movement {
    Movement::expense(date(2024, 1, 1), "Affitto", dec!(600.00)).unwrap()
}

fn scenario_a() -> LedgerStore {
    let mut store = LedgerStore::new();
    store.add(stipendio());
    store.add(affitto());
    store
}

fn mixed_ledger() -> Vec<Movement> {
    vec![
        Movement::income(date(2024, 1, 1), "Stipendio", dec!(1500.00)).unwrap(),
        Movement::expense(date(2024, 1, 3), "Spesa \"bio\"", dec!(45.20)).unwrap(),
        Movement::expense(date(2024, 1, 3), "Bolletta luce", dec!(0.10)).unwrap(),
        Movement::expense(date(2024, 1, 3), "Bolletta gas", dec!(0.20)).unwrap(),
        Movement::income(date(2024, 2, 1), "Rimborso", dec!(12.345)).unwrap(),
        Movement::expense(date(2024, 2, 15), "Affitto", dec!(600.00)).unwrap(),
    ]
}

#[test]
fn scenario_a_balance() {
    assert_eq!(scenario_a().balance().unwrap(), dec!(900.00));
}

#[test]
fn scenario_b_by_date_keeps_insertion_order() {
    let on_day = scenario_a().by_date(date(2024, 1, 1));

    assert_eq!(on_day.len(), 2);
    assert!(on_day[0].is_income());
    assert_eq!(on_day[0], stipendio());
    assert_eq!(on_day[1], affitto());
}

#[test]
fn scenario_c_remove_income() {
    let mut store = scenario_a();

    assert!(store.remove(&stipendio()));
    assert_eq!(store.balance().unwrap(), dec!(-600.00));
}

#[test]
fn scenario_d_comma_in_description_corrupts_columns() {
    let movement = Movement::expense(date(2024, 1, 1), "Spesa, extra", dec!(10.00)).unwrap();
    let encoded = encode_csv(&[movement]);
    assert!(encoded.contains("01/01/2024,Spesa, extra,10.00,Expense"));

    // " extra" lands in the amount column
    let err = decode_csv(&encoded).unwrap_err();
    assert!(err.is_parse());
    assert!(err.to_string().contains("extra"));
}

#[test]
fn scenario_e_malformed_date_returns_nothing() {
    let text = "Data,Descrizione,Ammontare,Tipo\n\
                01/01/2024,Stipendio,1500.00,Income\n\
                32/13/2024,Affitto,600.00,Expense\n\
                03/01/2024,Spesa,45.20,Expense\n";

    let err = decode_csv(text).unwrap_err();
    assert!(err.is_parse());
    assert!(!err.is_io());
}

#[test]
fn balance_is_exact_sum_of_signed_amounts() {
    let movements = mixed_ledger();
    let store = LedgerStore::from_movements(movements.clone());

    let expected: Decimal = movements.iter().map(Movement::signed_amount).sum();
    assert_eq!(store.balance().unwrap(), expected);
    assert_eq!(store.balance().unwrap(), dec!(866.845));
}

#[test]
fn by_date_is_an_ordered_subsequence() {
    let store = LedgerStore::from_movements(mixed_ledger());
    let day = date(2024, 1, 3);

    let on_day = store.by_date(day);
    assert!(on_day.iter().all(|m| m.date() == day));

    let descriptions: Vec<_> = on_day.iter().map(|m| m.description().to_string()).collect();
    assert_eq!(
        descriptions,
        vec!["Spesa \"bio\"", "Bolletta luce", "Bolletta gas"]
    );
}

#[test]
fn inverted_range_is_empty() {
    let store = LedgerStore::from_movements(mixed_ledger());

    assert!(store
        .by_date_range(date(2024, 2, 15), date(2024, 1, 1))
        .is_empty());
    assert_eq!(
        store
            .by_date_range(date(2024, 1, 1), date(2024, 2, 15))
            .len(),
        6
    );
}

#[test]
fn removing_absent_movement_changes_nothing() {
    let mut store = LedgerStore::from_movements(mixed_ledger());
    let before = store.all();

    let absent = Movement::income(date(2023, 12, 31), "Stipendio", dec!(1500.00)).unwrap();
    assert!(!store.remove(&absent));
    assert_eq!(store.all(), before);
}

#[test]
fn csv_and_text_round_trip() {
    let movements = mixed_ledger();

    assert_eq!(decode_csv(&encode_csv(&movements)).unwrap(), movements);
    assert_eq!(decode_text(&encode_text(&movements)).unwrap(), movements);
}

#[test]
fn ledger_files_round_trip_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let movements = mixed_ledger();

    for (name, format) in [("ledger.csv", Format::Csv), ("ledger.txt", Format::Text)] {
        let file = LedgerFile::new(temp_dir.path().join(name));
        assert_eq!(file.format(), format);

        file.save(&movements).unwrap();
        let decoded = file.load(DecodeMode::Strict).unwrap();
        assert_eq!(decoded.movements, movements);
        assert!(decoded.skipped.is_empty());
    }
}

#[test]
fn missing_file_is_io_error_not_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let file = LedgerFile::new(temp_dir.path().join("missing.csv"));

    let err = file.load(DecodeMode::Strict).unwrap_err();
    assert!(err.is_io());
    assert!(!err.is_parse());
}

#[test]
fn edit_as_remove_then_add_moves_movement_to_the_end() {
    let mut store = LedgerStore::from_movements(mixed_ledger());
    let old = store.all()[0].clone();

    assert!(store.remove(&old));
    let rejected = Movement::income(old.date(), "  ", old.amount());
    assert!(rejected.unwrap_err().is_invalid_argument());
    store.add(old.clone());

    assert_eq!(store.len(), 6);
    assert_eq!(store.all().last(), Some(&old));
    assert_eq!(store.balance().unwrap(), dec!(866.845));
}

#[test]
fn balance_of_huge_decoded_amounts_is_an_error_not_a_panic() {
    let text = "01/01/2024\tEnorme\t79228162514264337593543950335\tIncome\n\
                02/01/2024\tUno\t1\tIncome\n";
    let store = LedgerStore::from_movements(decode_text(text).unwrap());

    assert!(store.balance().unwrap_err().is_arithmetic());
}

#[test]
fn balance_refuses_to_drop_cents() {
    let text = "01/01/2024\tGrande\t1000000000000000000000000000\tIncome\n\
                02/01/2024\tCentesimo\t0.01\tIncome\n";
    let store = LedgerStore::from_movements(decode_text(text).unwrap());

    assert!(store.balance().unwrap_err().is_arithmetic());
    assert!(store.totals().unwrap_err().is_arithmetic());
}
