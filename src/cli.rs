use std::fs;
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::cards::parse_cards;
use crate::display::{group_table, print_error, print_section, print_steps, print_success};
use crate::error::SolverResult;
use crate::groups::classify;
use crate::solve::{solve, solve_turn, SolveRequest};

#[derive(Parser)]
#[command(
    name = "makiaveli",
    version = "1.0.0",
    about = "Makiaveli turn solver — can the hand be emptied onto the table?"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a turn from hand, floor and cross
    Solve {
        /// Hand cards (e.g., "3S 4S 5S")
        #[arg(long, default_value = "")]
        hand: String,
        /// A floor group; repeat per group (e.g., --floor "7H 7D 7C")
        #[arg(long = "floor")]
        floor: Vec<String>,
        /// Cross anchor cards (e.g., "2S KD")
        #[arg(long, default_value = "")]
        cross: String,
        /// Wall-clock budget in milliseconds
        #[arg(long)]
        deadline_ms: Option<u64>,
        /// Read a JSON request from a file instead of flags
        #[arg(long)]
        input: Option<String>,
        /// Emit the response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether a card list forms a valid group
    Check {
        /// Cards (e.g., "QS KS AS")
        cards: String,
    },
}

pub fn run() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Solve {
            hand,
            floor,
            cross,
            deadline_ms,
            input,
            json,
        } => cmd_solve(hand, floor, cross, deadline_ms, input, json),
        Commands::Check { cards } => cmd_check(&cards),
    };
    if let Err(err) = result {
        print_error(&err.to_string());
        process::exit(1);
    }
}

fn cmd_solve(
    hand: String,
    floor: Vec<String>,
    cross: String,
    deadline_ms: Option<u64>,
    input: Option<String>,
    json: bool,
) -> SolverResult<()> {
    let request = match input {
        Some(path) => {
            let text = fs::read_to_string(&path).unwrap_or_else(|err| {
                print_error(&format!("cannot read {}: {}", path, err));
                process::exit(1);
            });
            serde_json::from_str::<SolveRequest>(&text)?
        }
        None => SolveRequest {
            hand: split_codes(&hand),
            floor_groups: floor.iter().map(|g| split_codes(g)).collect(),
            cross: split_codes(&cross),
            deadline_ms,
        },
    };

    if json {
        let response = solve(&request);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    // Pretty mode re-solves at the card level to keep typed groups around.
    let hand_cards = parse_cards(&request.hand.join(" "))?;
    let floor_groups = request
        .floor_groups
        .iter()
        .map(|g| parse_cards(&g.join(" ")))
        .collect::<SolverResult<Vec<_>>>()?;
    let cross_cards = parse_cards(&request.cross.join(" "))?;
    let deadline = request.deadline_ms.map(std::time::Duration::from_millis);

    match solve_turn(&hand_cards, &floor_groups, &cross_cards, deadline)? {
        Some(solution) => {
            print_success("Solvable — the hand can be emptied this turn.");
            print_section("Target table", &group_table(&solution.target_groups));
            print_section("Steps", "");
            print_steps(&solution.steps);
            if !solution.remaining_cross.is_empty() {
                print_section(
                    "Remaining cross",
                    &crate::display::cards_line(&solution.remaining_cross),
                );
            }
        }
        None => {
            println!("{}", "No solution — the hand cannot be emptied.".yellow());
        }
    }
    Ok(())
}

fn cmd_check(cards: &str) -> SolverResult<()> {
    let cards = parse_cards(cards)?;
    match classify(&cards) {
        Some(kind) => print_success(&format!("Valid {}", kind.as_str())),
        None => println!("{}", "Not a valid group".yellow()),
    }
    Ok(())
}

fn split_codes(input: &str) -> Vec<String> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
