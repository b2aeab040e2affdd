// Slash commands and text rendering for the terminal debate

use crate::debate::{ScoreSnapshot, SessionResult, TurnOutcome};
use crate::metrics::MatchSummary;
use crate::rating::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Scores,
    End,
    Quit,
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "/help" => Some(Command::Help),
            "/scores" => Some(Command::Scores),
            "/end" => Some(Command::End),
            "/quit" | "/exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub fn format_help() -> String {
    r#"Available commands:
  /help      - Show this help message
  /scores    - Show the running scores
  /end       - Finish the debate and record the result
  /quit      - Leave without recording

Anything else is sent to your opponent as your next argument."#
        .to_string()
}

pub fn format_scores(scores: &ScoreSnapshot) -> String {
    format!(
        "Clarity {:.1} | Argument {:.1} | Rhetoric {:.1} | Overall {:.1}",
        scores.clarity, scores.argument, scores.rhetoric, scores.overall
    )
}

pub fn format_turn(outcome: &TurnOutcome) -> String {
    let mut output = format!("Opponent: {}\n", outcome.rebuttal.trim());

    match (&outcome.scores, &outcome.feedback) {
        (Some(scores), feedback) => {
            output.push_str(&format!("\n{}\n", format_scores(scores)));
            if let Some(feedback) = feedback.as_deref().filter(|f| !f.is_empty()) {
                output.push_str(&format!("Judge: {}\n", feedback));
            }
        }
        (None, _) => output.push_str("\n(turn not scored)\n"),
    }

    if let Some(verdict) = &outcome.verdict {
        output.push_str(&format!(
            "\nYour opponent calls it: {} wins ({:.1}). {}\nType /end to finish.\n",
            verdict.winner, verdict.final_score, verdict.summary
        ));
    }

    output
}

pub fn format_result(result: &SessionResult) -> String {
    let outcome = if result.rating.won { "WIN" } else { "LOSS" };
    let mut output = format!(
        "{} after {} scored turns\nFinal: {}\n",
        outcome,
        result.turns,
        format_scores(&result.final_scores)
    );

    if result.rating.rating_delta != 0 {
        output.push_str(&format!(
            "Rating {:+} -> {} ({})\n",
            result.rating.rating_delta, result.rating.new_rating, result.rating.new_rank
        ));
    } else {
        output.push_str(&format!(
            "Rating unchanged: {} ({})\n",
            result.rating.new_rating, result.rating.new_rank
        ));
    }

    output
}

pub fn format_profile(profile: &Profile, today: Option<&MatchSummary>) -> String {
    let progress = profile.rank_progress();
    let progress_line = match progress.needed {
        Some(needed) => format!(
            "{}/{} to {} ({}%)",
            progress.current, needed, progress.next_rank, progress.percentage
        ),
        None => progress.next_rank.clone(),
    };

    let mut output = format!(
        "{}\n\
        Rank: {} ({} rating)\n\
        Progress: {}\n\
        Record: {}W / {}L ({:.1}% win rate)\n\
        Debates: {} (ranked {}, hot takes {}, podcast {})\n\
        Average score: {:.1}\n\
        Streak: {} days (best {})\n",
        profile.username,
        profile.rank,
        profile.rating,
        progress_line,
        profile.wins,
        profile.losses,
        profile.win_rate(),
        profile.total_sessions,
        profile.ranked_played,
        profile.hot_takes_played,
        profile.podcast_played,
        profile.average_score,
        profile.streak_days,
        profile.best_streak
    );

    if let Some(today) = today.filter(|t| t.total > 0) {
        output.push_str(&format!(
            "Today: {} debates, {}W / {}L, mean {:.1}, rating {:+}\n",
            today.total, today.wins, today.losses, today.mean_score, today.rating_change
        ));
    }

    output
}
