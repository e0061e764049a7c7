//! Tournament evaluation - repeated matches with seat swapping
//!
//! Plays a configured number of games with one agent moving first, then
//! the same number with seats swapped, and aggregates wins, scores and
//! end reasons per half. Matches are independent; nothing carries over
//! between games except the aggregated counters.

use std::fmt;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use dotbox_core::{Agent, Player};

use crate::config::EvalConfig;
use crate::match_play::{play_match, ForcedReason, MatchEnd, MatchOutcome};

/// A named agent taking part in an evaluation
pub struct Entrant<'a> {
    pub name: &'a str,
    pub agent: &'a mut dyn Agent,
}

impl<'a> Entrant<'a> {
    pub fn new(name: &'a str, agent: &'a mut dyn Agent) -> Self {
        Self { name, agent }
    }
}

/// A named agent constructor, for parallel runs that need one instance
/// per in-flight match
pub struct EntrantSpec<'a> {
    pub name: &'a str,
    pub factory: &'a (dyn Fn() -> Box<dyn Agent> + Sync),
}

impl<'a> EntrantSpec<'a> {
    pub fn new(name: &'a str, factory: &'a (dyn Fn() -> Box<dyn Agent> + Sync)) -> Self {
        Self { name, factory }
    }
}

/// Aggregated results for one half of a run (fixed first mover)
#[derive(Clone, Debug, Serialize)]
pub struct HalfReport {
    /// Agent in the first-mover seat this half
    pub first_name: String,
    /// Agent in the second seat this half
    pub second_name: String,
    /// Games planned for this half
    pub games: usize,
    /// Wins per seat
    pub wins: [u32; 2],
    /// Natural ends with equal scores; neither win counter moves
    pub draws: u32,
    /// Total boxes per seat across the half
    pub total_scores: [u64; 2],
    /// Games decided by board exhaustion (including draws)
    pub normal_ends: u32,
    /// Games decided by a time-budget breach
    pub timeouts: u32,
    /// Games decided by a malformed or illegal move
    pub invalid_moves: u32,
    /// Rolling per-game log lines
    pub log: Vec<String>,
}

impl HalfReport {
    fn new(first_name: &str, second_name: &str, games: usize) -> Self {
        Self {
            first_name: first_name.to_string(),
            second_name: second_name.to_string(),
            games,
            wins: [0, 0],
            draws: 0,
            total_scores: [0, 0],
            normal_ends: 0,
            timeouts: 0,
            invalid_moves: 0,
            log: Vec::with_capacity(games),
        }
    }

    /// Games recorded so far
    pub fn played(&self) -> usize {
        self.log.len()
    }

    /// Win rate for a seat over the planned games
    pub fn win_rate(&self, seat: Player) -> f32 {
        if self.games == 0 {
            0.0
        } else {
            self.wins[seat.index()] as f32 / self.games as f32
        }
    }

    /// Average boxes per game for a seat
    pub fn avg_score(&self, seat: Player) -> f32 {
        if self.games == 0 {
            0.0
        } else {
            self.total_scores[seat.index()] as f32 / self.games as f32
        }
    }

    /// Fold one match into the tallies and return its rolling log line
    fn record(&mut self, outcome: &MatchOutcome) -> String {
        self.total_scores[0] += outcome.scores[0] as u64;
        self.total_scores[1] += outcome.scores[1] as u64;

        let (result, reason) = match outcome.end {
            MatchEnd::Natural => {
                self.normal_ends += 1;
                match outcome.winner() {
                    Some(seat) => {
                        self.wins[seat.index()] += 1;
                        let result = if seat == Player::First { "win" } else { "lose" };
                        (result, "normal")
                    }
                    None => {
                        self.draws += 1;
                        ("draw", "normal")
                    }
                }
            }
            MatchEnd::Forced { winner, reason } => {
                match reason {
                    ForcedReason::Timeout => self.timeouts += 1,
                    ForcedReason::InvalidMove => self.invalid_moves += 1,
                }
                self.wins[winner.index()] += 1;
                match (winner, reason) {
                    (Player::First, ForcedReason::Timeout) => ("win", "opponent timeout"),
                    (Player::First, ForcedReason::InvalidMove) => ("win", "opponent invalid move"),
                    (Player::Second, ForcedReason::Timeout) => ("lose", "timeout"),
                    (Player::Second, ForcedReason::InvalidMove) => ("lose", "invalid move"),
                }
            }
        };

        let played = self.log.len() + 1;
        let win_rate = self.wins[0] as f32 / played as f32 * 100.0;
        let line = format!(
            "[{played}/{total}] {name} as first: {result} ({reason}), current win rate = {win_rate:.2}%",
            total = self.games,
            name = self.first_name,
        );
        self.log.push(line.clone());
        line
    }
}

impl fmt::Display for HalfReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==== {} plays first ====", self.first_name)?;
        writeln!(f, "{:<22}: {}", "Games", self.games)?;
        writeln!(
            f,
            "{:<22}: {} ({:.2}%)",
            format!("{} wins", self.first_name),
            self.wins[0],
            self.win_rate(Player::First) * 100.0
        )?;
        writeln!(
            f,
            "{:<22}: {} ({:.2}%)",
            format!("{} wins", self.second_name),
            self.wins[1],
            self.win_rate(Player::Second) * 100.0
        )?;
        writeln!(f, "{:<22}: {}", "Draws", self.draws)?;
        writeln!(
            f,
            "{:<22}: {:.3}",
            format!("Avg {} score", self.first_name),
            self.avg_score(Player::First)
        )?;
        writeln!(
            f,
            "{:<22}: {:.3}",
            format!("Avg {} score", self.second_name),
            self.avg_score(Player::Second)
        )?;
        writeln!(f, "{:<22}: {}", "Normal endings", self.normal_ends)?;
        writeln!(f, "{:<22}: {}", "Timeouts", self.timeouts)?;
        write!(f, "{:<22}: {}", "Invalid moves", self.invalid_moves)
    }
}

/// Results of a full run: one half per first-mover assignment
#[derive(Clone, Debug, Serialize)]
pub struct EvalReport {
    pub halves: [HalfReport; 2],
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.halves[0], self.halves[1])
    }
}

/// Per-game snapshot handed to the run callback
pub struct GameProgress<'a> {
    /// 0 while the configured first agent leads, 1 after the swap
    pub half: usize,
    /// Games finished in this half, including this one
    pub played: usize,
    /// Games planned for this half
    pub total: usize,
    /// The finished match
    pub outcome: &'a MatchOutcome,
    /// The rolling log line for this game
    pub line: &'a str,
}

/// Runs evaluations under an [`EvalConfig`]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Run both halves sequentially.
    ///
    /// Both agents are initialized once up front; an initialization
    /// failure aborts the whole run.
    pub fn run(&self, first: Entrant<'_>, second: Entrant<'_>) -> Result<EvalReport> {
        self.run_with_callback(first, second, |_| {})
    }

    /// Like [`Evaluator::run`], invoking `on_game` after every match so a
    /// front end can drive progress display without waiting for the report
    pub fn run_with_callback<F>(
        &self,
        first: Entrant<'_>,
        second: Entrant<'_>,
        mut on_game: F,
    ) -> Result<EvalReport>
    where
        F: FnMut(&GameProgress<'_>),
    {
        let Entrant {
            name: first_name,
            agent: first_agent,
        } = first;
        let Entrant {
            name: second_name,
            agent: second_agent,
        } = second;

        first_agent
            .init()
            .with_context(|| format!("agent '{first_name}' failed to initialize"))?;
        second_agent
            .init()
            .with_context(|| format!("agent '{second_name}' failed to initialize"))?;

        let first_half = self.run_half(
            0,
            first_name,
            &mut *first_agent,
            second_name,
            &mut *second_agent,
            &mut on_game,
        );
        let second_half = self.run_half(
            1,
            second_name,
            &mut *second_agent,
            first_name,
            &mut *first_agent,
            &mut on_game,
        );

        Ok(EvalReport {
            halves: [first_half, second_half],
        })
    }

    /// Run both halves with matches in parallel.
    ///
    /// Every in-flight match gets fresh agent instances from the
    /// factories, so nothing is shared between workers; outcomes are
    /// folded into the report in game order at the join, which makes the
    /// rolling log identical to a sequential run of the same outcomes.
    pub fn run_parallel(&self, first: EntrantSpec<'_>, second: EntrantSpec<'_>) -> Result<EvalReport> {
        match self.config.workers {
            Some(workers) => rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .context("failed to build worker pool")?
                .install(|| self.run_parallel_halves(&first, &second)),
            None => self.run_parallel_halves(&first, &second),
        }
    }

    fn run_half<F>(
        &self,
        half: usize,
        first_name: &str,
        first: &mut dyn Agent,
        second_name: &str,
        second: &mut dyn Agent,
        on_game: &mut F,
    ) -> HalfReport
    where
        F: FnMut(&GameProgress<'_>),
    {
        let games = self.config.games_per_side;
        let mut report = HalfReport::new(first_name, second_name, games);

        for _ in 0..games {
            let outcome = play_match(first, second, &self.config.match_config);
            warn_on_forced(first_name, second_name, &outcome);
            let line = report.record(&outcome);
            tracing::debug!("{line}");
            on_game(&GameProgress {
                half,
                played: report.played(),
                total: games,
                outcome: &outcome,
                line: &line,
            });
        }

        report
    }

    fn run_parallel_halves(
        &self,
        first: &EntrantSpec<'_>,
        second: &EntrantSpec<'_>,
    ) -> Result<EvalReport> {
        let first_half = self.run_half_parallel(first, second)?;
        let second_half = self.run_half_parallel(second, first)?;
        Ok(EvalReport {
            halves: [first_half, second_half],
        })
    }

    fn run_half_parallel(
        &self,
        first: &EntrantSpec<'_>,
        second: &EntrantSpec<'_>,
    ) -> Result<HalfReport> {
        let games = self.config.games_per_side;

        let outcomes: Result<Vec<MatchOutcome>> = (0..games)
            .into_par_iter()
            .map(|_| {
                let mut a = (first.factory)();
                a.init()
                    .with_context(|| format!("agent '{}' failed to initialize", first.name))?;
                let mut b = (second.factory)();
                b.init()
                    .with_context(|| format!("agent '{}' failed to initialize", second.name))?;
                Ok(play_match(a.as_mut(), b.as_mut(), &self.config.match_config))
            })
            .collect();

        let mut report = HalfReport::new(first.name, second.name, games);
        for outcome in outcomes? {
            warn_on_forced(first.name, second.name, &outcome);
            report.record(&outcome);
        }
        Ok(report)
    }
}

fn warn_on_forced(first_name: &str, second_name: &str, outcome: &MatchOutcome) {
    if let MatchEnd::Forced { winner, reason } = outcome.end {
        let winner_name = match winner {
            Player::First => first_name,
            Player::Second => second_name,
        };
        let what = match reason {
            ForcedReason::Timeout => "timeout",
            ForcedReason::InvalidMove => "wrong move",
        };
        tracing::warn!("{winner_name} won because opponent {what}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::match_play::Replay;
    use dotbox_core::{Edge, Orientation, RandomAgent, ScriptedAgent};
    use std::time::Duration;

    fn natural_outcome(scores: [u32; 2]) -> MatchOutcome {
        MatchOutcome {
            scores,
            end: MatchEnd::Natural,
            time_used: [Duration::ZERO, Duration::ZERO],
            replay: Replay::new(5, 5),
        }
    }

    fn forced_outcome(winner: Player, reason: ForcedReason) -> MatchOutcome {
        MatchOutcome {
            scores: [0, 0],
            end: MatchEnd::Forced { winner, reason },
            time_used: [Duration::ZERO, Duration::ZERO],
            replay: Replay::new(5, 5),
        }
    }

    #[test]
    fn test_record_natural_win() {
        let mut report = HalfReport::new("alice", "bob", 10);
        let line = report.record(&natural_outcome([13, 12]));
        assert_eq!(report.wins, [1, 0]);
        assert_eq!(report.normal_ends, 1);
        assert_eq!(
            line,
            "[1/10] alice as first: win (normal), current win rate = 100.00%"
        );
    }

    #[test]
    fn test_record_natural_draw_moves_no_counter() {
        let mut report = HalfReport::new("alice", "bob", 10);
        let line = report.record(&natural_outcome([12, 12]));
        assert_eq!(report.wins, [0, 0]);
        assert_eq!(report.draws, 1);
        assert_eq!(report.normal_ends, 1);
        assert_eq!(
            line,
            "[1/10] alice as first: draw (normal), current win rate = 0.00%"
        );
    }

    #[test]
    fn test_record_forced_ends() {
        let mut report = HalfReport::new("alice", "bob", 4);
        let line = report.record(&forced_outcome(Player::First, ForcedReason::Timeout));
        assert!(line.contains("win (opponent timeout)"));

        let line = report.record(&forced_outcome(Player::First, ForcedReason::InvalidMove));
        assert!(line.contains("win (opponent invalid move)"));

        let line = report.record(&forced_outcome(Player::Second, ForcedReason::Timeout));
        assert!(line.contains("lose (timeout)"));

        let line = report.record(&forced_outcome(Player::Second, ForcedReason::InvalidMove));
        assert!(line.contains("lose (invalid move)"));

        assert_eq!(report.wins, [2, 2]);
        assert_eq!(report.timeouts, 2);
        assert_eq!(report.invalid_moves, 2);
        assert_eq!(report.normal_ends, 0);
    }

    #[test]
    fn test_running_win_rate() {
        let mut report = HalfReport::new("alice", "bob", 4);
        report.record(&natural_outcome([13, 12]));
        report.record(&natural_outcome([12, 13]));
        let line = report.record(&natural_outcome([13, 12]));
        assert!(line.ends_with("current win rate = 66.67%"), "{line}");
    }

    #[test]
    fn test_forced_wins_give_a_perfect_half() {
        // Second always opens with an unplayable edge, so the first seat
        // wins every game of the first half by forced result.
        let evaluator = Evaluator::new(EvalConfig::new(10));
        let mut good = RandomAgent::with_seed(1);
        let mut bad = AlwaysInvalid;

        let report = evaluator
            .run(Entrant::new("good", &mut good), Entrant::new("bad", &mut bad))
            .unwrap();

        let first_half = &report.halves[0];
        assert_eq!(first_half.first_name, "good");
        assert_eq!(first_half.wins, [10, 0]);
        assert_eq!(first_half.invalid_moves, 10);
        assert_eq!(first_half.win_rate(Player::First), 1.0);
        assert_eq!(
            first_half.log[9],
            "[10/10] good as first: win (opponent invalid move), current win rate = 100.00%"
        );

        // After the swap the offender moves first and forfeits instantly
        let second_half = &report.halves[1];
        assert_eq!(second_half.first_name, "bad");
        assert_eq!(second_half.wins, [0, 10]);
        assert_eq!(second_half.invalid_moves, 10);
    }

    struct AlwaysInvalid;

    impl Agent for AlwaysInvalid {
        fn choose_move(&mut self, _view: &dotbox_core::BoardView) -> anyhow::Result<Edge> {
            Ok(Edge::new(9, 9, Orientation::Horizontal))
        }
    }

    #[test]
    fn test_halves_swap_seats() {
        let evaluator = Evaluator::new(EvalConfig::new(2));
        let mut a = RandomAgent::with_seed(100);
        let mut b = RandomAgent::with_seed(200);

        let report = evaluator
            .run(Entrant::new("a", &mut a), Entrant::new("b", &mut b))
            .unwrap();

        assert_eq!(report.halves[0].first_name, "a");
        assert_eq!(report.halves[0].second_name, "b");
        assert_eq!(report.halves[1].first_name, "b");
        assert_eq!(report.halves[1].second_name, "a");
        for half in &report.halves {
            assert_eq!(half.played(), 2);
            assert_eq!(half.wins[0] + half.wins[1] + half.draws, 2);
            assert_eq!(half.normal_ends + half.timeouts + half.invalid_moves, 2);
        }
    }

    #[test]
    fn test_callback_sees_every_game() {
        let evaluator = Evaluator::new(EvalConfig::new(3));
        let mut a = RandomAgent::with_seed(4);
        let mut b = RandomAgent::with_seed(5);

        let mut seen = Vec::new();
        evaluator
            .run_with_callback(
                Entrant::new("a", &mut a),
                Entrant::new("b", &mut b),
                |progress| seen.push((progress.half, progress.played, progress.total)),
            )
            .unwrap();

        assert_eq!(
            seen,
            vec![(0, 1, 3), (0, 2, 3), (0, 3, 3), (1, 1, 3), (1, 2, 3), (1, 3, 3)]
        );
    }

    #[test]
    fn test_init_failure_aborts_the_run() {
        struct FailsInit;
        impl Agent for FailsInit {
            fn init(&mut self) -> anyhow::Result<()> {
                anyhow::bail!("model weights missing")
            }
            fn choose_move(&mut self, _view: &dotbox_core::BoardView) -> anyhow::Result<Edge> {
                unreachable!("init never succeeds")
            }
        }

        let evaluator = Evaluator::new(EvalConfig::new(5));
        let mut a = FailsInit;
        let mut b = RandomAgent::with_seed(6);

        let err = evaluator
            .run(Entrant::new("broken", &mut a), Entrant::new("ok", &mut b))
            .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_parallel_run_matches_planned_counts() {
        let config = EvalConfig::new(4)
            .with_parallel(true)
            .with_workers(2)
            .with_match_config(MatchConfig::default());
        let evaluator = Evaluator::new(config);

        let first_factory = |s: u64| move || -> Box<dyn Agent> { Box::new(RandomAgent::with_seed(s)) };
        let fa = first_factory(1);
        let fb = first_factory(2);

        let report = evaluator
            .run_parallel(EntrantSpec::new("a", &fa), EntrantSpec::new("b", &fb))
            .unwrap();

        for half in &report.halves {
            assert_eq!(half.played(), 4);
            assert_eq!(half.wins[0] + half.wins[1] + half.draws, 4);
        }
    }

    #[test]
    fn test_scripted_game_feeds_scores_into_totals() {
        // One game: First completes box (0,0) and then forfeits, so the
        // half records a 1-0 score alongside the forced loss.
        let evaluator = Evaluator::new(EvalConfig::new(1));
        let mut a = ScriptedAgent::new(vec![
            Edge::new(0, 0, Orientation::Horizontal),
            Edge::new(0, 0, Orientation::Vertical),
            Edge::new(1, 0, Orientation::Vertical),
            Edge::new(9, 9, Orientation::Horizontal),
        ]);
        let mut b = ScriptedAgent::new(vec![
            Edge::new(0, 1, Orientation::Horizontal),
            Edge::new(5, 4, Orientation::Vertical),
        ]);

        let report = evaluator
            .run(Entrant::new("a", &mut a), Entrant::new("b", &mut b))
            .unwrap();

        let half = &report.halves[0];
        assert_eq!(half.total_scores, [1, 0]);
        assert_eq!(half.wins, [0, 1]);
        assert_eq!(half.invalid_moves, 1);
    }
}
