mod common;

use std::fs;

use onsite::{cli::run_at, AppContext, CliError};
use onsite_config::{Config, ConfigManager};
use onsite_core::CoreError;
use serde_json::Value;

#[test]
fn first_run_starts_from_seeded_defaults() {
    let (context, _) = common::setup_test_env(|_| {});
    assert_eq!(context.finance.expenses().len(), 2);
    assert_eq!(context.finance.revenues().len(), 1);
    assert!(!context.session.is_authenticated());
}

#[test]
fn seeding_can_be_switched_off() {
    let (mut context, _) = common::setup_test_env(|cfg| cfg.seed_defaults = false);
    assert!(context.finance.ledger().is_empty());
    let out = common::run(&mut context, &["summary"]).unwrap();
    assert!(out.contains("No entries recorded yet."));
}

#[test]
fn entries_added_through_commands_survive_a_restart() {
    let (mut context, base) = common::setup_test_env(|cfg| cfg.seed_defaults = false);
    common::run(
        &mut context,
        &["add-revenue", "--amount", "1000", "--date", "2025-01-10", "--source", "invoice"],
    )
    .unwrap();
    common::run(
        &mut context,
        &["add-expense", "--amount", "400", "--date", "2025-01-20", "--description", " Fuel "],
    )
    .unwrap();
    drop(context);

    let mut reopened = AppContext::open_at(base).expect("reopen");
    assert_eq!(reopened.finance.expenses()[0].description, "Fuel");
    let json = common::run(&mut reopened, &["summary", "--json"]).unwrap();
    let rows: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        rows,
        serde_json::json!([{ "month": "2025-01", "income": 1000.0, "expenses": 400.0, "net": 600.0 }])
    );
}

#[test]
fn autosave_off_still_persists_each_command() {
    let (mut context, base) = common::setup_test_env(|cfg| {
        cfg.seed_defaults = false;
        cfg.autosave = false;
    });
    common::run(
        &mut context,
        &["add-expense", "--amount", "75", "--description", "Parking"],
    )
    .unwrap();
    assert!(!context.finance.is_dirty());
    drop(context);

    let reopened = AppContext::open_at(base).expect("reopen");
    assert_eq!(reopened.finance.expenses().len(), 1);
}

#[test]
fn form_rules_reject_zero_amounts_and_blank_descriptions() {
    let (mut context, _) = common::setup_test_env(|cfg| cfg.seed_defaults = false);
    let err = common::run(
        &mut context,
        &["add-expense", "--amount", "0", "--description", "Fuel"],
    )
    .unwrap_err();
    assert!(matches!(err, CliError::Input(_)));

    let err = common::run(
        &mut context,
        &["add-expense", "--amount", "10", "--description", "   "],
    )
    .unwrap_err();
    assert!(matches!(err, CliError::Input(_)));

    let err = common::run(
        &mut context,
        &["add-expense", "--amount", "-10", "--description", "Refund"],
    )
    .unwrap_err();
    assert!(matches!(err, CliError::Core(CoreError::Validation(_))));
    assert!(context.finance.expenses().is_empty());
}

#[test]
fn exports_land_in_the_export_directory() {
    let (mut context, base) = common::setup_test_env(|cfg| cfg.seed_defaults = false);
    common::run(
        &mut context,
        &[
            "add-expense",
            "--amount",
            "120",
            "--date",
            "2025-01-01T00:00:00Z",
            "--description",
            "Service call",
            "--job-id",
            "j1",
            "--job-title",
            "Smith Job",
        ],
    )
    .unwrap();

    let out = common::run(&mut context, &["export", "csv"]).unwrap();
    let csv_path = base.join("exports").join("finance.csv");
    assert!(out.contains("finance.csv"));
    assert_eq!(
        fs::read_to_string(&csv_path).unwrap(),
        "Type,Date,Amount,Description,JobId,JobTitle,Source\n\
         Expense,2025-01-01T00:00:00Z,120,Service call,j1,Smith Job,"
    );

    common::run(&mut context, &["export", "pdf"]).unwrap();
    let pdf = fs::read(base.join("exports").join("finance.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-1.4"));

    common::run(&mut context, &["export", "html"]).unwrap();
    let html = fs::read_to_string(base.join("exports").join("cashflow.html")).unwrap();
    assert!(html.contains(">-120.00</td>"));

    assert!(matches!(
        common::run(&mut context, &["export", "xlsx"]),
        Err(CliError::Usage(_))
    ));
}

#[test]
fn blocked_export_directory_is_reported_as_unavailable() {
    let blocker = common::temp_base().join("not-a-dir");
    fs::write(&blocker, "file").unwrap();
    let (mut context, _) = common::setup_test_env(|cfg| cfg.export_dir = Some(blocker.clone()));
    let err = common::run(&mut context, &["export", "csv"]).unwrap_err();
    assert!(matches!(err, CliError::Core(CoreError::ExportUnavailable(_))));
}

#[test]
fn session_commands_round_trip_through_storage() {
    let (mut context, base) = common::setup_test_env(|_| {});
    let out = common::run(
        &mut context,
        &["login", "--name", "Sam Plumber", "--id", "u_7", "--onboarding"],
    )
    .unwrap();
    assert!(out.contains("Signed in as Sam Plumber (u_7), onboarding pending"));
    drop(context);

    let mut reopened = AppContext::open_at(base.clone()).expect("reopen");
    assert!(reopened.session.needs_onboarding());
    common::run(&mut reopened, &["onboarded"]).unwrap();
    common::run(&mut reopened, &["logout"]).unwrap();
    drop(reopened);

    let mut last = AppContext::open_at(base).expect("reopen");
    let out = common::run(&mut last, &["whoami"]).unwrap();
    assert_eq!(out.trim(), "Not signed in.");
    let out = common::run(&mut last, &["demo-login"]).unwrap();
    assert!(out.contains("Alex Contractor (u_1) <demo@onsite.app>"));
}

#[test]
fn config_changes_apply_on_next_open() {
    let (mut context, base) = common::setup_test_env(|cfg| cfg.seed_defaults = false);
    let out = common::run(&mut context, &["config", "set", "month_zone", "+02:00"]).unwrap();
    assert_eq!(out.trim(), "month_zone = +02:00");
    assert!(matches!(
        common::run(&mut context, &["config", "set", "month_zone", "Mars/Olympus"]),
        Err(CliError::Input(_))
    ));
    common::run(
        &mut context,
        &["add-expense", "--amount", "5", "--date", "2025-01-31T23:00:00Z", "--description", "Late call-out"],
    )
    .unwrap();
    drop(context);

    let reopened = AppContext::open_at(base).expect("reopen");
    assert_eq!(reopened.config().month_zone, "+02:00");
    assert_eq!(reopened.finance.monthly_summary()[0].month.as_str(), "2025-02");
}

#[test]
fn every_change_leaves_a_backup_of_the_previous_ledger() {
    let (mut context, _) = common::setup_test_env(|cfg| cfg.seed_defaults = false);
    common::run(&mut context, &["add-expense", "--amount", "1", "--description", "A"]).unwrap();
    assert!(common::run(&mut context, &["backups"]).unwrap().contains("No backups yet."));
    common::run(&mut context, &["add-expense", "--amount", "2", "--description", "B"]).unwrap();
    let out = common::run(&mut context, &["backups"]).unwrap();
    assert!(out.contains("finance-store_"));
}

#[test]
fn finance_key_may_not_share_the_session_record() {
    let (mut context, base) = common::setup_test_env(|_| {});
    common::run(&mut context, &["demo-login"]).unwrap();

    for clash in ["auth-store", "Auth-Store", " auth-store "] {
        let err = common::run(&mut context, &["config", "set", "finance_key", clash]).unwrap_err();
        assert!(matches!(err, CliError::Input(_)), "{clash} accepted");
    }
    assert_eq!(context.config().finance_key, "finance-store");
    drop(context);

    let manager = ConfigManager::with_base_dir(base.clone()).unwrap();
    let mut config = manager.load().unwrap();
    config.finance_key = "auth store".into();
    config.auth_key = "auth_store".into();
    manager.save(&config).unwrap();
    assert!(matches!(
        AppContext::open_at(base.clone()),
        Err(CliError::Input(_))
    ));

    config.auth_key = "auth-store".into();
    config.finance_key = "finance-store".into();
    manager.save(&config).unwrap();
    let reopened = AppContext::open_at(base).expect("reopen");
    assert!(reopened.session.is_authenticated());
}

#[test]
fn config_can_repair_a_setting_that_blocks_startup() {
    let base = common::temp_base();
    let manager = ConfigManager::with_base_dir(base.clone()).unwrap();
    let config = Config {
        month_zone: "Africa/Johannesburg".into(),
        ..Config::default()
    };
    manager.save(&config).unwrap();
    assert!(matches!(
        AppContext::open_at(base.clone()),
        Err(CliError::Input(_))
    ));

    let mut out = Vec::new();
    run_at(base.clone(), ["config", "get", "month_zone"], &mut out).unwrap();
    assert_eq!(String::from_utf8_lossy(&out).trim(), "Africa/Johannesburg");

    let mut out = Vec::new();
    run_at(base.clone(), ["config", "set", "month_zone", "local"], &mut out).unwrap();
    assert_eq!(String::from_utf8_lossy(&out).trim(), "month_zone = local");
    assert!(AppContext::open_at(base.clone()).is_ok());

    let mut out = Vec::new();
    run_at(base, ["summary"], &mut out).unwrap();
    assert!(String::from_utf8_lossy(&out).contains("Amounts in ZAR"));
}

#[test]
fn restore_puts_an_earlier_ledger_back() {
    let (mut context, _) = common::setup_test_env(|cfg| cfg.seed_defaults = false);
    common::run(&mut context, &["add-expense", "--amount", "1", "--description", "A"]).unwrap();
    common::run(&mut context, &["add-expense", "--amount", "2", "--description", "B"]).unwrap();
    assert_eq!(context.finance.expenses().len(), 2);

    let backups = context.storage().list_backups("finance-store").unwrap();
    let id = backups[0].id.clone();
    let out = common::run(&mut context, &["restore", &id]).unwrap();
    assert!(out.contains("(1 entries)"));
    assert_eq!(context.finance.expenses().len(), 1);
    assert_eq!(context.finance.expenses()[0].description, "A");

    assert!(matches!(
        common::run(&mut context, &["restore", "finance-store_19990101_000000.json"]),
        Err(CliError::Input(_))
    ));
    assert!(matches!(
        common::run(&mut context, &["restore"]),
        Err(CliError::Usage(_))
    ));
}

#[test]
fn summary_table_ends_with_a_whole_ledger_total() {
    let (mut context, _) = common::setup_test_env(|cfg| cfg.seed_defaults = false);
    common::run(&mut context, &["add-revenue", "--amount", "500", "--date", "2025-01-10"]).unwrap();
    common::run(
        &mut context,
        &["add-expense", "--amount", "200", "--date", "2025-02-10", "--description", "Fuel"],
    )
    .unwrap();
    let out = common::run(&mut context, &["summary"]).unwrap();
    let total = out
        .lines()
        .find(|line| line.starts_with("Total"))
        .expect("total row");
    assert!(total.contains("500.00"));
    assert!(total.contains("200.00"));
    assert!(total.contains("300.00"));
}
