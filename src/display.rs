use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use itertools::Itertools;

use crate::cards::{Card, Suit};
use crate::groups::Group;
use crate::reconstruct::Step;

pub fn card_display(card: Card) -> String {
    let text = card.pretty();
    match card.suit {
        Suit::Spades => text.white().to_string(),
        Suit::Hearts => text.red().to_string(),
        Suit::Diamonds => text.blue().to_string(),
        Suit::Clubs => text.green().to_string(),
    }
}

pub fn cards_line(cards: &[Card]) -> String {
    cards.iter().map(|&c| card_display(c)).join(" ")
}

pub fn group_table(groups: &[Group]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").set_alignment(CellAlignment::Right),
        Cell::new("Kind"),
        Cell::new("Cards"),
    ]);
    for (i, group) in groups.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(group.kind().as_str()),
            Cell::new(cards_line(group.cards())),
        ]);
    }
    table.to_string()
}

pub fn print_steps(steps: &[Step]) {
    for (i, step) in steps.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).dimmed(), step);
    }
}

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    println!("{}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

pub fn print_success(msg: &str) {
    println!("{}", msg.green().bold());
}
