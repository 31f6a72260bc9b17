//! Console output formatter

use colored::Colorize;
use poker_application::RoundState;
use poker_domain::{Feature, Participant};
use std::collections::BTreeMap;

/// Formats room and backlog state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the backlog in priority order
    pub fn format_backlog(features: &[Feature]) -> String {
        if features.is_empty() {
            return format!("{}\n", "Backlog is empty.".dimmed());
        }

        let mut output = String::new();
        output.push_str(&format!(
            "{:>4}  {:>8}  {:<24} {:<12} {:<10} {}\n",
            "id".bold(),
            "priority".bold(),
            "name".bold(),
            "status".bold(),
            "mode".bold(),
            "participants".bold()
        ));
        for feature in features {
            let difficulty = feature
                .difficulty
                .map(|d| format!(" (difficulty {d})"))
                .unwrap_or_default();
            output.push_str(&format!(
                "{:>4}  {:>8}  {:<24} {:<12} {:<10} {}{}\n",
                feature.id,
                feature.priority,
                feature.name,
                feature.status,
                feature.voting_mode.to_string(),
                feature.participants.join(", "),
                difficulty.dimmed()
            ));
        }
        output
    }

    /// Format one feature in detail
    pub fn format_feature(feature: &Feature) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {} {}\n",
            format!("#{}", feature.id).yellow().bold(),
            feature.name.bold(),
            format!("[{}]", feature.status).dimmed()
        ));
        if !feature.description.is_empty() {
            output.push_str(&format!("  {}\n", feature.description));
        }
        output.push_str(&format!(
            "  priority {}, mode {}, expected voters: {}\n",
            feature.priority,
            feature.voting_mode.description(),
            if feature.participants.is_empty() {
                "none listed".to_string()
            } else {
                feature.participants.join(", ")
            }
        ));
        output
    }

    /// Format the connected roster. Vote values stay hidden until the
    /// round is revealed; before that only a cast/waiting marker shows.
    pub fn format_roster(roster: &[Participant], revealed: bool) -> String {
        if roster.is_empty() {
            return format!("{}\n", "Nobody is connected.".dimmed());
        }

        let mut output = String::new();
        for participant in roster {
            let vote = match (&participant.vote, revealed) {
                (Some(v), true) => format!("voted {}", v).green().to_string(),
                (Some(_), false) => "voted".green().to_string(),
                (None, _) => "waiting".dimmed().to_string(),
            };
            output.push_str(&format!(
                "  {:<12} {:<14} {}\n",
                participant.pseudo.bold(),
                participant.role.to_string(),
                vote
            ));
        }
        output
    }

    /// Format a revealed vote snapshot
    pub fn format_reveal(votes: &BTreeMap<String, String>) -> String {
        if votes.is_empty() {
            return format!("{}\n", "No votes cast yet.".dimmed());
        }
        let mut output = String::from("Votes:\n");
        for (pseudo, vote) in votes {
            output.push_str(&format!("  {:<12} {}\n", pseudo, vote.cyan().bold()));
        }
        output
    }

    /// Format the validation verdict
    pub fn format_verdict(approved: bool) -> String {
        if approved {
            format!("{}\n", "Feature approved.".green().bold())
        } else {
            format!("{}\n", "Feature not approved.".red().bold())
        }
    }

    /// Format the round indicators
    pub fn format_round(round: &RoundState) -> String {
        let flag = |on: bool| if on { "yes".green() } else { "no".dimmed() };
        format!(
            "  active feature: {}\n  voting started: {}   everyone voted: {}\n  votes revealed: {}   approved: {}   discussion: {}\n",
            round
                .active_feature_id
                .map(|id| format!("#{id}"))
                .unwrap_or_else(|| "none".to_string()),
            flag(round.voting_started),
            flag(round.everyone_voted),
            flag(round.votes_revealed),
            flag(round.feature_approved),
            flag(round.discussion_active),
        )
    }
}
