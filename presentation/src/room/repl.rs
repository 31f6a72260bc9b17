//! REPL (Read-Eval-Print Loop) for the interactive voting room
//!
//! One terminal stands in for the whole room: each `join` mints a fresh
//! connection token, and `select` picks the acting identity, the way a
//! per-browser session would. The REPL is the single-threaded writer the
//! coordinator relies on.

use crate::ConsoleFormatter;
use colored::Colorize;
use poker_application::{AccessPolicy, BacklogRepository, RoomSettings, SessionCoordinator};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// Interactive room REPL
pub struct RoomRepl<R: BacklogRepository, P: AccessPolicy> {
    coordinator: SessionCoordinator<R, P>,
    settings: RoomSettings,
    next_token: u32,
}

impl<R: BacklogRepository, P: AccessPolicy> RoomRepl<R, P> {
    pub fn new(coordinator: SessionCoordinator<R, P>, settings: RoomSettings) -> Self {
        Self {
            coordinator,
            settings,
            next_token: 0,
        }
    }

    /// Run the interactive REPL
    pub fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("backlog-poker").join("history.txt"));
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);
                    if self.handle_line(line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│         backlog-poker - Voting Room         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Deck: {}", self.settings.deck.join(" "));
        if let Some(feature) = self.coordinator.backlog().highest_priority() {
            println!("Under consideration:");
            print!("{}", ConsoleFormatter::format_feature(feature));
        } else {
            println!("{}", "The backlog is empty.".dimmed());
        }
        println!("Type 'help' for commands.");
        println!();
    }

    /// Handle one line; returns true when the REPL should exit
    fn handle_line(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match command {
            "join" => self.cmd_join(&args),
            "logout" => self.cmd_logout(&args),
            "select" => self.cmd_select(&args),
            "start" => self.cmd_start(&args),
            "vote" => self.cmd_vote(&args),
            "reveal" => self.cmd_reveal(),
            "validate" => self.cmd_validate(),
            "reset" => {
                self.coordinator.reset_round();
                println!("Round reset; votes cleared.");
            }
            "discuss" => {
                self.coordinator.open_discussion();
                println!("Discussion opened.");
            }
            "team" => self.cmd_team(),
            "status" => self.cmd_status(),
            "backlog" => {
                print!(
                    "{}",
                    ConsoleFormatter::format_backlog(self.coordinator.backlog().list())
                );
            }
            "help" => self.print_help(),
            "quit" | "exit" => return true,
            other => {
                println!("Unknown command '{}'. Type 'help'.", other.red());
            }
        }
        false
    }

    fn cmd_join(&mut self, args: &[&str]) {
        let Some(pseudo) = args.first() else {
            println!("usage: join <pseudo>");
            return;
        };
        self.next_token += 1;
        let token = format!("term-{}", self.next_token);
        match self.coordinator.join(pseudo, &token) {
            Ok(participant) => {
                println!(
                    "{} joined as {}.",
                    participant.pseudo.bold(),
                    participant.role
                );
            }
            Err(error) => println!("{}", error.to_string().red()),
        }
    }

    fn cmd_logout(&mut self, args: &[&str]) {
        let Some(pseudo) = args.first() else {
            println!("usage: logout <pseudo>");
            return;
        };
        match self
            .coordinator
            .participant(pseudo)
            .map(|p| p.connection_token.clone())
        {
            Some(token) => {
                self.coordinator.logout(&token);
                println!("{} left the room.", pseudo.bold());
            }
            None => println!("{}", format!("'{pseudo}' is not connected").red()),
        }
    }

    fn cmd_select(&mut self, args: &[&str]) {
        let Some(pseudo) = args.first() else {
            println!("usage: select <pseudo>");
            return;
        };
        match self.coordinator.select(pseudo) {
            Ok(()) => println!("Acting as {}.", pseudo.bold()),
            Err(error) => println!("{}", error.to_string().red()),
        }
    }

    fn cmd_start(&mut self, args: &[&str]) {
        let feature_id = match args.first() {
            Some(raw) => match raw.parse::<u32>() {
                Ok(id) => id,
                Err(_) => {
                    println!("usage: start [feature-id]");
                    return;
                }
            },
            None => match self.coordinator.backlog().highest_priority() {
                Some(feature) => feature.id,
                None => {
                    println!("{}", "The backlog is empty; nothing to vote on.".red());
                    return;
                }
            },
        };

        if let Some(feature) = self.coordinator.backlog().get(feature_id) {
            if !self.coordinator.is_team_complete(feature) {
                let missing: Vec<&str> = feature
                    .participants
                    .iter()
                    .filter(|expected| self.coordinator.participant(expected).is_none())
                    .map(String::as_str)
                    .collect();
                println!(
                    "{} missing: {}",
                    "Team is not complete;".red(),
                    missing.join(", ")
                );
                return;
            }
        }

        match self.coordinator.start_round(feature_id) {
            Ok(()) => {
                if let Some(feature) = self.coordinator.backlog().get(feature_id) {
                    println!("Voting started on:");
                    print!("{}", ConsoleFormatter::format_feature(feature));
                }
            }
            Err(error) => println!("{}", error.to_string().red()),
        }
    }

    fn cmd_vote(&mut self, args: &[&str]) {
        let (pseudo, value) = match args {
            [value] => match self.coordinator.active_participant() {
                Some(participant) => (participant.pseudo.clone(), value.to_string()),
                None => {
                    println!("No acting participant; use 'select <pseudo>' or 'vote <pseudo> <card>'.");
                    return;
                }
            },
            [pseudo, value] => (pseudo.to_string(), value.to_string()),
            _ => {
                println!("usage: vote [pseudo] <card>");
                return;
            }
        };

        if !self.settings.deck_contains(&value) {
            println!(
                "{} the deck is: {}",
                format!("'{value}' is not a card in this room's deck;").red(),
                self.settings.deck.join(" ")
            );
            return;
        }

        match self.coordinator.cast_vote(&pseudo, &value) {
            Ok(()) => {
                println!("Vote recorded for {}.", pseudo.bold());
                if self.coordinator.all_voted() {
                    println!("{}", "Everyone has voted.".green());
                }
            }
            Err(error) => println!("{}", error.to_string().red()),
        }
    }

    fn cmd_reveal(&mut self) {
        let votes = self.coordinator.reveal_votes();
        print!("{}", ConsoleFormatter::format_reveal(&votes));
    }

    fn cmd_validate(&mut self) {
        match self.coordinator.validate_round() {
            Ok(approved) => print!("{}", ConsoleFormatter::format_verdict(approved)),
            Err(error) => println!("{}", error.to_string().red()),
        }
    }

    fn cmd_team(&self) {
        match self.coordinator.backlog().highest_priority() {
            Some(feature) => {
                let complete = self.coordinator.is_team_complete(feature);
                println!(
                    "Expected for '{}': {}",
                    feature.name,
                    feature.participants.join(", ")
                );
                if complete {
                    println!("{}", "Team is complete.".green());
                } else {
                    println!("{}", "Team is not complete.".red());
                }
            }
            None => println!("{}", "The backlog is empty.".dimmed()),
        }
    }

    fn cmd_status(&self) {
        let revealed = self.coordinator.round().votes_revealed;
        print!("{}", ConsoleFormatter::format_round(self.coordinator.round()));
        print!(
            "{}",
            ConsoleFormatter::format_roster(self.coordinator.roster(), revealed)
        );
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  join <pseudo>         connect a participant");
        println!("  logout <pseudo>       disconnect a participant");
        println!("  select <pseudo>       set the acting identity");
        println!("  start [id]            open a round (default: top of backlog)");
        println!("  vote [pseudo] <card>  cast a vote from the deck");
        println!("  reveal                show all cast votes");
        println!("  validate              evaluate the round's approval rule");
        println!("  reset                 clear votes without a new round");
        println!("  discuss               flag a discussion");
        println!("  team                  expected vs connected participants");
        println!("  status                round indicators and roster");
        println!("  backlog               print the backlog");
        println!("  quit                  leave");
    }
}
