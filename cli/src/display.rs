//! Schedule rendering for the terminal.

use owo_colors::{AnsiColors, OwoColorize};

use vimewatch_core::timers::ScheduleEntry;

/// One evaluation round: every tracked boss and its next respawn time,
/// soonest first, separated from the previous round by a rule.
pub fn print_schedule(entries: &[ScheduleEntry], colored: bool) {
    for entry in entries {
        let time = entry.respawn_at.format("%H:%M:%S");
        if colored {
            println!("{} {}", entry.name.color(name_color(&entry.name)), time);
        } else {
            println!("{} {}", entry.name, time);
        }
    }
    println!("{}", "-".repeat(60));
}

/// Traditional chat colors of the stock bosses; anything unknown stays
/// uncolored.
fn name_color(name: &str) -> AnsiColors {
    match name {
        "Королевский зомби" | "Холуй" | "Всадники апокалипсиса" => AnsiColors::White,
        "Сточный слизень" | "Матка" => AnsiColors::Green,
        "Фенрир" | "Коровка из Коровёнки" => AnsiColors::Red,
        "Левиафан" => AnsiColors::Yellow,
        "Йети" | "Хранитель подводного мира" => AnsiColors::Cyan,
        "Житель края" => AnsiColors::Magenta,
        "Небесный владыка" => AnsiColors::Blue,
        _ => AnsiColors::Default,
    }
}
