use colored::Colorize;

pub fn print_help() {
    println!("\n🥗 {}", "Nutrition Lookup".bold());
    println!("  Type any dish or product to analyze it");
    println!("  Examples:");
    println!("    - борщ со сметаной");
    println!("    - авокадо тост");
    println!("    - Куриная грудка с рисом 200г");
    println!();

    println!("📒 Log Commands:");
    println!("  add           - Add the current result to today's log");
    println!("  log           - Show today's log and totals");
    println!("  remove <n>    - Remove entry n (as numbered in 'log') or by id");
    println!();

    println!("⚙️ System Commands:");
    println!("  help  - Show this help menu");
    println!("  exit  - Exit the program");
    println!();
}
