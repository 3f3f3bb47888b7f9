//! Menu command handlers: rendering, prompts, and write-through mutations.

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::editor::{self, TransactionDraft};
use crate::model::{BudgetConfig, Category, Tag, Transaction, TransactionKind};
use crate::stats::{category_label, Period, TxFilter};
use crate::storage::export_file_name;

use super::{output, prompt_err, App, CliResult};

pub fn dashboard(app: &App) -> CliResult<()> {
    let stats = app.aggregates();
    output::section(format!("Dashboard ({})", app.period.label()));
    match stats.remaining {
        Some(remaining) => output::info(format!(
            "Budget {:.2} | spent {:.2} | remaining {:.2}",
            stats.threshold, stats.expense, remaining
        )),
        None => output::info(format!("No budget set | net {:.2}", stats.net)),
    }
    output::info(format!(
        "Income {:.2} | Expense {:.2} | Net {:.2}",
        stats.income, stats.expense, stats.net
    ));
    if app.budget.enable_alerts {
        if stats.is_over_budget {
            output::error("Over budget");
        } else if stats.is_warning {
            output::warning("Budget nearly used up");
        }
    }

    if !stats.breakdown.is_empty() {
        output::section("Top expense categories");
        for (slice, share) in stats.breakdown_top(5) {
            output::info(format!(
                "{:<20} {:>10.2}  {:>5.1}%",
                slice.label,
                slice.total,
                share * 100.0
            ));
        }
    }

    if !stats.trend.is_empty() {
        output::section("Last 7 days");
        for point in &stats.trend {
            output::info(format!("{:>6}  {:>10.2}", point.label, point.net));
        }
    }
    Ok(())
}

pub fn list_transactions(app: &mut App) -> CliResult<()> {
    let stats = app.aggregates();
    let scope = if app.filter.is_active() {
        "filtered, all history"
    } else {
        app.period.label()
    };
    output::section(format!(
        "Transactions ({}, {} records)",
        scope,
        stats.display_list.len()
    ));
    for txn in &stats.display_list {
        output::info(render_line(app, txn));
    }
    if stats.display_list.is_empty() {
        output::info("No records.");
        return Ok(());
    }

    let actions = ["Back", "Edit a record", "Delete a record"];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Action")
        .items(&actions)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    match choice {
        1 => edit_transaction(app, &stats.display_list),
        2 => delete_transaction(app, &stats.display_list),
        _ => Ok(()),
    }
}

fn render_line(app: &App, txn: &Transaction) -> String {
    let category = app.categories.iter().find(|c| c.id == txn.category_id);
    let glyph = output::icon_glyph(category.map(|c| c.icon.as_str()).unwrap_or(""));
    let label = category_label(&app.categories, &txn.category_id);
    let tag = app
        .tags
        .iter()
        .find(|t| t.id == txn.tag_id)
        .map(|t| t.name.as_str())
        .unwrap_or(crate::stats::UNKNOWN_LABEL);
    let sign = match txn.kind {
        TransactionKind::Income => '+',
        TransactionKind::Expense => '-',
    };
    format!(
        "{} {}  {}{:.2}  [{}] {}  {}",
        txn.occurred_at.format("%Y-%m-%d %H:%M"),
        glyph,
        sign,
        txn.amount,
        label,
        tag,
        txn.note
    )
}

pub fn add_transaction(app: &mut App) -> CliResult<()> {
    let draft = prompt_draft(app, None)?;
    match editor::validate(&draft, &app.categories) {
        Ok(txn) => {
            let kind = txn.kind.label();
            app.commit_transaction(txn)?;
            output::success(format!("Saved {kind} record"));
        }
        Err(err) => output::error(err.to_string()),
    }
    Ok(())
}

fn edit_transaction(app: &mut App, visible: &[Transaction]) -> CliResult<()> {
    let Some(target) = pick_transaction(app, visible, "Edit which record?")? else {
        return Ok(());
    };
    let draft = prompt_draft(app, Some(&target))?;
    match editor::validate_edit(&draft, &app.categories, &target.id) {
        Ok(txn) => {
            app.commit_transaction(txn)?;
            output::success("Record updated");
        }
        Err(err) => output::error(err.to_string()),
    }
    Ok(())
}

fn delete_transaction(app: &mut App, visible: &[Transaction]) -> CliResult<()> {
    let Some(target) = pick_transaction(app, visible, "Delete which record?")? else {
        return Ok(());
    };
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Delete this record? This cannot be undone.")
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    if confirmed {
        app.delete_transaction(&target.id)?;
        output::info("Record deleted");
    }
    Ok(())
}

fn pick_transaction(
    app: &App,
    visible: &[Transaction],
    prompt: &str,
) -> CliResult<Option<Transaction>> {
    let mut lines: Vec<String> = visible.iter().map(|t| render_line(app, t)).collect();
    lines.push("Cancel".into());
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&lines)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(visible.get(choice).cloned())
}

/// Walks the entry form. Switching kind resets the category selection to the
/// first category of the new kind.
fn prompt_draft(app: &App, existing: Option<&Transaction>) -> CliResult<TransactionDraft> {
    let kinds = ["expense", "income"];
    let kind_default = match existing.map(|t| t.kind) {
        Some(TransactionKind::Income) => 1,
        _ => 0,
    };
    let kind_idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Kind")
        .items(&kinds)
        .default(kind_default)
        .interact()
        .map_err(prompt_err)?;
    let kind = if kind_idx == 1 {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };

    let amount: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Amount")
        .with_initial_text(
            existing
                .map(|t| t.amount.to_string())
                .unwrap_or_default(),
        )
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let choices: Vec<&Category> = app.categories.iter().filter(|c| c.kind == kind).collect();
    // Switching kind away from the record's own kind resets the selection to
    // the first category of the new kind; no categories means no selection
    // (validation rejects the draft later).
    let preselected = existing
        .filter(|t| t.kind == kind)
        .map(|t| t.category_id.clone())
        .or_else(|| editor::first_category_for_kind(&app.categories, kind).map(|c| c.id.clone()));
    let category_id = if choices.is_empty() {
        None
    } else {
        let names: Vec<String> = choices
            .iter()
            .map(|c| format!("{} {}", output::icon_glyph(&c.icon), c.name))
            .collect();
        let default = preselected
            .and_then(|id| choices.iter().position(|c| c.id == id))
            .unwrap_or(0);
        let idx = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Category")
            .items(&names)
            .default(default)
            .interact()
            .map_err(prompt_err)?;
        Some(choices[idx].id.clone())
    };

    let tag_id = if app.tags.is_empty() {
        None
    } else {
        let names: Vec<&str> = app.tags.iter().map(|t| t.name.as_str()).collect();
        let kept = existing.and_then(|t| app.tags.iter().position(|tag| tag.id == t.tag_id));
        let idx = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Payment method")
            .items(&names)
            .default(kept.unwrap_or(0))
            .interact()
            .map_err(prompt_err)?;
        Some(app.tags[idx].id.clone())
    };

    let note: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Note (max 50 chars)")
        .with_initial_text(existing.map(|t| t.note.clone()).unwrap_or_default())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let default_date = existing
        .map(|t| t.occurred_at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
    let date: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Date (YYYY-MM-DD)")
        .with_initial_text(default_date)
        .interact_text()
        .map_err(prompt_err)?;

    Ok(TransactionDraft {
        amount,
        kind,
        category_id,
        tag_id,
        note,
        date,
    })
}

pub fn choose_period(app: &mut App) -> CliResult<()> {
    let periods = [Period::Day, Period::Week, Period::Month];
    let labels = ["Day", "Week", "Month"];
    let current = periods.iter().position(|p| *p == app.period).unwrap_or(0);
    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Reporting period")
        .items(&labels)
        .default(current)
        .interact()
        .map_err(prompt_err)?;
    app.period = periods[idx];
    Ok(())
}

pub fn edit_filter(app: &mut App) -> CliResult<()> {
    let kinds = ["all", "expense", "income"];
    let kind_idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Kind")
        .items(&kinds)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let kind = match kind_idx {
        1 => Some(TransactionKind::Expense),
        2 => Some(TransactionKind::Income),
        _ => None,
    };

    let mut tag_names = vec!["all".to_string()];
    tag_names.extend(app.tags.iter().map(|t| t.name.clone()));
    let tag_idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Payment method")
        .items(&tag_names)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let tag_id = (tag_idx > 0).then(|| app.tags[tag_idx - 1].id.clone());

    let date_start = prompt_date("From date (blank for none)")?;
    let date_end = prompt_date("To date (blank for none)")?;

    app.filter = TxFilter {
        kind,
        tag_id,
        date_start,
        date_end,
    };
    if app.filter.is_active() {
        output::info("Filter active: list shows all matching history");
    } else {
        output::info("Filter cleared: list follows the reporting period");
    }
    Ok(())
}

fn prompt_date(prompt: &str) -> CliResult<Option<NaiveDate>> {
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date)),
        Err(_) => {
            output::error("Invalid date, ignored");
            Ok(None)
        }
    }
}

pub fn budget_settings(app: &mut App) -> CliResult<()> {
    let daily = prompt_threshold("Daily budget (0 disables)", app.budget.daily)?;
    let weekly = prompt_threshold("Weekly budget (0 disables)", app.budget.weekly)?;
    let monthly = prompt_threshold("Monthly budget (0 disables)", app.budget.monthly)?;
    let enable_alerts = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Enable budget alerts?")
        .default(app.budget.enable_alerts)
        .interact()
        .map_err(prompt_err)?;
    app.save_budget(BudgetConfig {
        daily,
        weekly,
        monthly,
        enable_alerts,
    })?;
    output::success("Budget settings updated");
    Ok(())
}

fn prompt_threshold(prompt: &str, current: f64) -> CliResult<f64> {
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(format!("{current}"))
        .interact_text()
        .map_err(prompt_err)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => {
            output::error("Invalid threshold, keeping previous value");
            Ok(current)
        }
    }
}

pub fn manage_categories(app: &mut App) -> CliResult<()> {
    let actions = ["Back", "List", "Add", "Delete"];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Categories")
        .items(&actions)
        .default(1)
        .interact()
        .map_err(prompt_err)?;
    match choice {
        1 => {
            for category in &app.categories {
                output::info(format!(
                    "{} {} ({})",
                    output::icon_glyph(&category.icon),
                    category.name,
                    category.kind.label()
                ));
            }
            Ok(())
        }
        2 => {
            let name: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Category name")
                .interact_text()
                .map_err(prompt_err)?;
            if name.trim().is_empty() {
                return Ok(());
            }
            app.add_category(Category::new(name.trim()))?;
            output::success("Category added");
            Ok(())
        }
        3 => {
            let mut names: Vec<String> = app.categories.iter().map(|c| c.name.clone()).collect();
            names.push("Cancel".into());
            let idx = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Delete which category?")
                .items(&names)
                .default(0)
                .interact()
                .map_err(prompt_err)?;
            if let Some(category) = app.categories.get(idx).cloned() {
                app.delete_category(&category.id)?;
                output::info(format!("Category \"{}\" deleted", category.name));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn manage_tags(app: &mut App) -> CliResult<()> {
    let actions = ["Back", "List", "Add", "Delete"];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Payment methods")
        .items(&actions)
        .default(1)
        .interact()
        .map_err(prompt_err)?;
    match choice {
        1 => {
            for tag in &app.tags {
                output::info(&tag.name);
            }
            Ok(())
        }
        2 => {
            let name: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Tag name")
                .interact_text()
                .map_err(prompt_err)?;
            if name.trim().is_empty() {
                return Ok(());
            }
            app.add_tag(Tag::new(name.trim()))?;
            output::success("Tag added");
            Ok(())
        }
        3 => {
            let mut names: Vec<String> = app.tags.iter().map(|t| t.name.clone()).collect();
            names.push("Cancel".into());
            let idx = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Delete which tag?")
                .items(&names)
                .default(0)
                .interact()
                .map_err(prompt_err)?;
            if let Some(tag) = app.tags.get(idx).cloned() {
                app.delete_tag(&tag.id)?;
                output::info(format!("Tag \"{}\" deleted", tag.name));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn export_data(app: &App) -> CliResult<()> {
    let blob = app.export_snapshot()?;
    let file_name = export_file_name(Local::now().date_naive());
    std::fs::write(&file_name, blob)?;
    output::success(format!("Exported to {file_name}"));
    Ok(())
}

pub fn import_data(app: &mut App) -> CliResult<()> {
    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Path to backup file")
        .interact_text()
        .map_err(prompt_err)?;
    let blob = std::fs::read_to_string(path.trim())?;
    match app.import_snapshot(&blob) {
        Ok(()) => output::success("Import complete"),
        Err(err) => output::error(format!("Import failed: {err}")),
    }
    Ok(())
}

pub fn clear_all(app: &mut App) -> CliResult<()> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Erase ALL data? This cannot be undone.")
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    if confirmed {
        app.clear_all()?;
        output::info("All data cleared; defaults restored");
    }
    Ok(())
}
