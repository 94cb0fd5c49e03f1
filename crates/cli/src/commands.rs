use std::io::Write;

use anyhow::{bail, Context};
use chrono::Datelike;
use serde::Serialize;

use stockroom_auth::PassphraseGate;
use stockroom_core::Entity;
use stockroom_infra::{FileSnapshotStore, StockroomConfig, Warehouse};
use stockroom_inventory::{
    DepartmentReport, IssueRecord, IssueRequest, Item, ItemDraft, ItemPatch, PeriodReport,
    ReportPeriod, StockLevel,
};

use crate::args::{Cli, Command, DepartmentCommand, EditArgs, IssueArgs, ReceiveArgs};

/// Execute one command against the snapshot directory, writing the result to
/// `out`.
pub fn run(cli: Cli, config: &StockroomConfig, out: &mut impl Write) -> anyhow::Result<()> {
    PassphraseGate::new(config.passphrase.clone())
        .require(&cli.passphrase)
        .context("login failed")?;

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let store = FileSnapshotStore::new(data_dir);
    tracing::debug!(data_dir = %store.dir().display(), "opening warehouse");
    let mut warehouse = Warehouse::open(store);
    let json = cli.json;

    match cli.command {
        Command::Login => writeln!(out, "ok")?,
        Command::Items {
            available,
            category,
        } => {
            let catalog = warehouse.catalog();
            let items: Vec<&Item> = match category {
                Some(category) => catalog.items_in_category(category).collect(),
                None => catalog.items().iter().collect(),
            };
            let items: Vec<&Item> = items
                .into_iter()
                .filter(|i| !available || i.quantity() > 0)
                .collect();
            if json {
                print_json(out, &items)?;
            } else {
                for item in items {
                    print_item(out, item)?;
                }
                writeln!(
                    out,
                    "итого: {} шт на {}",
                    catalog.total_units(),
                    catalog.total_value()
                )?;
            }
        }
        Command::Receive(args) => {
            let item = warehouse.add_item(draft_from(args))?;
            emit_item(out, json, &item)?;
        }
        Command::Edit(args) => {
            let current = warehouse
                .catalog()
                .get(&args.id)
                .with_context(|| format!("item {} not found", args.id))?;
            let (id, patch) = patch_from(args, ItemPatch::from_item(current));
            let item = warehouse.edit_item(&id, patch)?;
            emit_item(out, json, &item)?;
        }
        Command::Delete { id } => {
            let item = warehouse.delete_item(&id)?;
            writeln!(out, "deleted {} ({})", item.id(), item.name())?;
        }
        Command::Issue(args) => {
            let (request, date) = issue_from(args);
            let record = match date {
                Some(date) => warehouse.issue_on(request, date)?,
                None => warehouse.issue(request)?,
            };
            if json {
                print_json(out, &record)?;
            } else {
                print_record(out, &record)?;
            }
        }
        Command::History => {
            if json {
                let records: Vec<&IssueRecord> = warehouse.ledger().records().collect();
                print_json(out, &records)?;
            } else {
                for record in warehouse.ledger().records() {
                    print_record(out, record)?;
                }
            }
        }
        Command::Departments { command } => match command {
            DepartmentCommand::List => {
                if json {
                    print_json(out, warehouse.departments().names())?;
                } else {
                    for name in warehouse.departments().names() {
                        writeln!(out, "{name}")?;
                    }
                }
            }
            DepartmentCommand::Add { name } => {
                let added = warehouse.add_department(&name)?;
                writeln!(out, "added {added}")?;
            }
            DepartmentCommand::Remove { name } => {
                let removed = warehouse.remove_department(&name)?;
                writeln!(out, "removed {removed}")?;
            }
        },
        Command::Report {
            month,
            year,
            department,
        } => {
            let today = warehouse.today();
            let period = match (month, year) {
                (None, None) => ReportPeriod::containing(today),
                (month, year) => ReportPeriod::new(
                    month.unwrap_or_else(|| today.month()),
                    year.unwrap_or_else(|| today.year()),
                )?,
            };
            match department {
                Some(name) => {
                    let group = warehouse.department_report(period, &name);
                    if json {
                        print_json(out, &group)?;
                    } else {
                        print_group(out, &group, true)?;
                    }
                }
                None => {
                    let report = warehouse.report(period);
                    if json {
                        print_json(out, &report)?;
                    } else {
                        print_report(out, &report)?;
                    }
                }
            }
        }
        Command::Export { out: dir } => {
            let path = warehouse
                .export()
                .write_to_dir(&dir)
                .with_context(|| format!("failed to export into {}", dir.display()))?;
            writeln!(out, "{}", path.display())?;
        }
        Command::Clear { yes } => {
            if !yes {
                bail!("refusing to clear without --yes");
            }
            warehouse.clear();
            writeln!(out, "cleared")?;
        }
    }

    Ok(())
}

/// [`run`], then flush `out`. A failed flush fails the command.
pub fn run_and_flush(cli: Cli, config: &StockroomConfig, out: &mut impl Write) -> anyhow::Result<()> {
    run(cli, config, out)?;
    out.flush().context("failed to flush output")
}

fn draft_from(args: ReceiveArgs) -> ItemDraft {
    ItemDraft {
        name: args.name,
        subcategory: Some(args.subcategory),
        quantity: args.quantity,
        unit_price: args.price,
        description: args.description,
    }
}

fn patch_from(args: EditArgs, mut patch: ItemPatch) -> (stockroom_core::ItemId, ItemPatch) {
    if let Some(name) = args.name {
        patch.name = name;
    }
    if let Some(category) = args.category {
        patch.category = category;
    }
    if let Some(subcategory) = args.subcategory {
        patch.subcategory = subcategory;
    }
    if let Some(quantity) = args.quantity {
        patch.quantity = quantity;
    }
    if let Some(price) = args.price {
        patch.unit_price = price;
    }
    if args.description.is_some() {
        patch.description = args.description;
    }
    (args.id, patch)
}

fn issue_from(args: IssueArgs) -> (IssueRequest, Option<chrono::NaiveDate>) {
    let request = IssueRequest {
        item_id: args.item,
        quantity: args.quantity,
        recipient: args.recipient,
        department: args.department,
    };
    (request, args.date)
}

fn print_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn emit_item(out: &mut impl Write, json: bool, item: &Item) -> anyhow::Result<()> {
    if json {
        print_json(out, item)
    } else {
        print_item(out, item)
    }
}

fn print_item(out: &mut impl Write, item: &Item) -> anyhow::Result<()> {
    let level = match item.stock_level() {
        StockLevel::InStock => "",
        StockLevel::Low => " [low]",
        StockLevel::OutOfStock => " [out]",
    };
    writeln!(
        out,
        "{}\t{}\t{} / {}\t{} шт{}\t{}",
        item.id(),
        item.name(),
        item.category().label(),
        item.subcategory().label(),
        item.quantity(),
        level,
        item.unit_price(),
    )?;
    Ok(())
}

fn print_record(out: &mut impl Write, record: &IssueRecord) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{} x {}\t{}\t{}\t{}",
        record.issued_on(),
        record.item_name(),
        record.quantity(),
        record.unit_price(),
        record.total_price(),
        record.recipient(),
        record.department(),
    )?;
    Ok(())
}

fn print_group(out: &mut impl Write, group: &DepartmentReport, drill_down: bool) -> anyhow::Result<()> {
    let subcategories: Vec<&str> = group.subcategories.iter().map(|s| s.label()).collect();
    writeln!(
        out,
        "{}: {} ({} шт, {} операций) [{}]",
        group.department,
        group.total_value,
        group.total_units,
        group.operation_count(),
        subcategories.join(", "),
    )?;
    if drill_down {
        for record in &group.records {
            write!(out, "  ")?;
            print_record(out, record)?;
        }
    }
    Ok(())
}

fn print_report(out: &mut impl Write, report: &PeriodReport) -> anyhow::Result<()> {
    let s = &report.summary;
    writeln!(
        out,
        "{}: total {}, {} operations, {} departments, {} units",
        report.period, s.total_value, s.operation_count, s.department_count, s.total_units,
    )?;
    for group in &report.departments {
        print_group(out, group, false)?;
    }
    Ok(())
}
