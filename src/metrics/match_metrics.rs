use std::time::{Duration, Instant};

use crate::game::{SerpentId, Verdict};

/// Running tally of a match for the header line
pub struct MatchMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub rounds_played: u32,
    pub round_wins: [u32; 2],
    pub draws: u32,
    last_round: u32,
}

impl MatchMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            rounds_played: 0,
            round_wins: [0; 2],
            draws: 0,
            last_round: 0,
        }
    }

    /// Refresh the clock unless the match is already decided
    pub fn update(&mut self, game_over: bool) {
        if !game_over {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    /// Count a resolved round once, however many frames report it
    pub fn on_round_resolved(&mut self, round: u32, verdict: Verdict) {
        if round <= self.last_round {
            return;
        }
        self.last_round = round;
        self.rounds_played += 1;
        match verdict {
            Verdict::Winner(id) => self.round_wins[id.index()] += 1,
            Verdict::Draw => self.draws += 1,
        }
    }

    pub fn wins(&self, id: SerpentId) -> u32 {
        self.round_wins[id.index()]
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for MatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = MatchMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_round_tally() {
        let mut metrics = MatchMetrics::new();

        metrics.on_round_resolved(1, Verdict::Winner(SerpentId::Two));
        metrics.on_round_resolved(2, Verdict::Draw);
        metrics.on_round_resolved(3, Verdict::Winner(SerpentId::Two));

        assert_eq!(metrics.rounds_played, 3);
        assert_eq!(metrics.wins(SerpentId::Two), 2);
        assert_eq!(metrics.wins(SerpentId::One), 0);
        assert_eq!(metrics.draws, 1);
    }

    #[test]
    fn test_same_round_counted_once() {
        let mut metrics = MatchMetrics::new();
        for _ in 0..5 {
            metrics.on_round_resolved(1, Verdict::Draw);
        }
        assert_eq!(metrics.rounds_played, 1);
        assert_eq!(metrics.draws, 1);
    }

    #[test]
    fn test_clock_stops_at_game_over() {
        let mut metrics = MatchMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update(true);
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        metrics.update(false);
        assert!(metrics.elapsed_time.as_millis() >= 20);
    }
}
