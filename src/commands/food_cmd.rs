use colored::{ColoredString, Colorize};
use crate::food::daily_log::FoodLog;
use crate::food::macros::{Macro, MacroShare};
use crate::food::models::NutritionEstimate;
use chrono::Local;

const CHART_WIDTH: usize = 30;

fn paint(kind: Macro, text: &str) -> ColoredString {
    match kind {
        Macro::Protein => text.blue(),
        Macro::Fat => text.yellow(),
        Macro::Carbs => text.green(),
    }
}

pub fn render_card(estimate: &NutritionEstimate) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n🍽️  {}\n", estimate.name.bold()));
    out.push_str(&format!("   {}\n", estimate.portion_label().dimmed()));
    out.push_str(&format!("   {}\n", "━".repeat(CHART_WIDTH)));
    out.push_str(&format!("   {:<18}{:>12}\n", "Calories".bold(), format!("{} kcal", estimate.calories).bold()));
    out.push_str(&format!("   {}\n", "─".repeat(CHART_WIDTH)));
    for (kind, grams) in [
        (Macro::Protein, estimate.protein),
        (Macro::Fat, estimate.fat),
        (Macro::Carbs, estimate.carbs),
    ] {
        out.push_str(&format!("   {} {:<16}{:>12}\n", paint(kind, "●"), kind.label(), format!("{}g", grams)));
    }
    out.push_str(&format!("   {}\n", "━".repeat(CHART_WIDTH)));
    out.push_str(&format!(
        "   {}\n",
        "ℹ️  Values are approximate AI estimates. Verify them for medical purposes.".dimmed()
    ));
    out.push_str(&format!("   Type {} to add it to today's log.\n", "add".cyan()));
    out
}

/// Horizontal bar per macro, sized by its share of the total grams.
pub fn render_macro_chart(shares: &[MacroShare]) -> String {
    if shares.is_empty() {
        return String::new();
    }

    let mut out = format!("\n📊 {}\n", "Macro distribution".bold());
    for share in shares {
        let filled = ((share.percent / 100.0) * CHART_WIDTH as f64).round() as usize;
        let bar = "█".repeat(filled.clamp(1, CHART_WIDTH));
        out.push_str(&format!(
            "   {:<8} {:<width$} {}g ({:.1}%)\n",
            share.kind.label(),
            paint(share.kind, &bar),
            share.grams,
            share.percent,
            width = CHART_WIDTH,
        ));
    }
    out
}

pub fn render_log(log: &FoodLog) -> String {
    if log.is_empty() {
        return format!(
            "\n📒 {}\n   {}\n",
            "Your food log is empty.".dimmed(),
            "Add foods to see today's totals.".dimmed()
        );
    }

    let totals = log.totals();
    let mut out = format!("\n📒 {}\n", "Today's totals".bold());
    out.push_str(&format!(
        "   {} kcal | P: {} | F: {} | C: {}\n",
        format!("{:.0}", totals.calories).bold(),
        format!("{:.0}g", totals.protein).blue(),
        format!("{:.0}g", totals.fat).yellow(),
        format!("{:.0}g", totals.carbs).green(),
    ));
    out.push_str(&format!("   {}\n", "─".repeat(CHART_WIDTH)));

    for (position, entry) in log.newest_first().enumerate() {
        let estimate = &entry.estimate;
        out.push_str(&format!(
            "   {:>2}. {} {}\n       {} kcal • P:{} F:{} C:{}\n",
            position + 1,
            estimate.name,
            entry.logged_at.with_timezone(&Local).format("%H:%M").to_string().dimmed(),
            estimate.calories,
            estimate.protein,
            estimate.fat,
            estimate.carbs,
        ));
    }
    out.push_str(&format!("   Remove an entry with {}.\n", "remove <n>".cyan()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::food::macros::macro_breakdown;

    fn toast() -> NutritionEstimate {
        NutritionEstimate {
            name: "Тост с авокадо".to_string(),
            calories: 250.0,
            protein: 6.0,
            fat: 15.0,
            carbs: 22.0,
            weight_grams: 150.0,
            description: None,
        }
    }

    #[test]
    fn test_card_shows_calories_macros_and_weight_fallback() {
        let card = render_card(&toast());
        assert!(card.contains("Тост с авокадо"));
        assert!(card.contains("250 kcal"));
        assert!(card.contains("6g"));
        assert!(card.contains("15g"));
        assert!(card.contains("22g"));
        assert!(card.contains("150g"));
    }

    #[test]
    fn test_chart_lists_percentages() {
        let chart = render_macro_chart(&macro_breakdown(&toast()));
        assert!(chart.contains("14.0%"));
        assert!(chart.contains("34.9%"));
        assert!(chart.contains("51.2%"));
    }

    #[test]
    fn test_chart_is_empty_without_macros() {
        let mut empty = toast();
        empty.protein = 0.0;
        empty.fat = 0.0;
        empty.carbs = 0.0;
        assert!(render_macro_chart(&macro_breakdown(&empty)).is_empty());
    }

    #[test]
    fn test_log_panel_lists_newest_first_with_rounded_totals() {
        let mut log = FoodLog::new();
        let mut soup = toast();
        soup.name = "Борщ".to_string();
        soup.calories = 400.4;
        log.append(toast());
        log.append(soup);

        let panel = render_log(&log);
        assert!(panel.contains("650"));
        let soup_at = panel.find("Борщ").unwrap();
        let toast_at = panel.find("Тост с авокадо").unwrap();
        assert!(soup_at < toast_at);
    }

    #[test]
    fn test_empty_log_panel() {
        assert!(render_log(&FoodLog::new()).contains("empty"));
    }
}
