use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

use super::{
    action::Direction,
    config::GameConfig,
    error::GameError,
    food::FoodRegistry,
    round::{RoundCoordinator, RoundPhase, Verdict},
    serpent::Serpent,
    snapshot::{MatchSnapshot, MatchStatus, SerpentView},
    state::{Cell, Grid, SerpentId},
};

/// Random draws before falling back to scanning for free cells
const RANDOM_PLACEMENT_ATTEMPTS: usize = 64;

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub tick: u64,
    /// Whether each serpent ate this tick, indexed by `SerpentId::index`
    pub ate: [bool; 2],
    /// Alive flags after the tick
    pub alive: [bool; 2],
    /// Food items placed from queued spawn requests
    pub spawned: Vec<Cell>,
    /// The tick ended the round
    pub round_over: bool,
}

/// Result of resolving a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub round: u32,
    pub verdict: Verdict,
    pub lives: [u32; 2],
    pub game_over: bool,
}

/// The match controller: both serpents, the food, the round state and the lives.
///
/// All methods are synchronous. The scheduler serializes access through a
/// single lock, so every call observes and leaves a consistent state.
pub struct MatchEngine {
    config: GameConfig,
    grid: Grid,
    serpents: [Serpent; 2],
    food: FoodRegistry,
    coordinator: RoundCoordinator,
    lives: [u32; 2],
    game_over: bool,
    last_verdict: Option<Verdict>,
    tick: u64,
    pending_spawns: u32,
    rng: StdRng,
}

impl MatchEngine {
    /// Create a new match with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let grid = Grid::new(config.grid_size);
        let serpents = SerpentId::BOTH.map(|id| {
            let (spawn, direction) = config.spawn(id);
            Serpent::new(id, spawn, direction)
        });
        let mut food = FoodRegistry::new();
        food.reseed(grid.center());
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            lives: [config.starting_lives; 2],
            config,
            grid,
            serpents,
            food,
            coordinator: RoundCoordinator::new(),
            game_over: false,
            last_verdict: None,
            tick: 0,
            pending_spawns: 0,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn serpent(&self, id: SerpentId) -> &Serpent {
        &self.serpents[id.index()]
    }

    pub fn food(&self) -> &FoodRegistry {
        &self.food
    }

    pub fn lives(&self) -> [u32; 2] {
        self.lives
    }

    pub fn phase(&self) -> RoundPhase {
        self.coordinator.phase()
    }

    pub fn round(&self) -> u32 {
        self.coordinator.round()
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> MatchStatus {
        if self.game_over {
            MatchStatus::GameOver
        } else if self.coordinator.is_running() {
            MatchStatus::Running
        } else {
            MatchStatus::RoundOver
        }
    }

    /// Whether ticks and food spawns currently have any effect
    pub fn is_round_active(&self) -> bool {
        self.status() == MatchStatus::Running
    }

    /// Winner of the match by remaining lives, once it is over
    pub fn winner(&self) -> Option<Verdict> {
        if !self.game_over {
            return None;
        }
        let [one, two] = self.lives;
        Some(match one.cmp(&two) {
            std::cmp::Ordering::Greater => Verdict::Winner(SerpentId::One),
            std::cmp::Ordering::Less => Verdict::Winner(SerpentId::Two),
            std::cmp::Ordering::Equal => Verdict::Draw,
        })
    }

    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    /// Apply a directional input. Ignored outside a running round.
    pub fn steer(&mut self, id: SerpentId, direction: Direction) -> bool {
        if !self.is_round_active() {
            return false;
        }
        self.serpents[id.index()].set_direction(direction)
    }

    /// Queue a food item for placement at the end of the next tick
    pub fn request_food(&mut self) -> bool {
        if !self.is_round_active() {
            return false;
        }
        self.pending_spawns = self.pending_spawns.saturating_add(1);
        true
    }

    pub fn pending_spawns(&self) -> u32 {
        self.pending_spawns
    }

    /// Run one tick: advance both, check both, feed both, place queued food.
    ///
    /// Returns `None` while the round is frozen or the match is over.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.is_round_active() {
            return None;
        }
        self.tick += 1;

        let [one, two] = &mut self.serpents;

        // Collision checks must see both fully advanced bodies
        one.advance();
        two.advance();

        one.check_bounds_collision(&self.grid);
        two.check_bounds_collision(&self.grid);

        one.check_collision_with(two);
        two.check_collision_with(one);

        let mut ate = [false; 2];
        for serpent in self.serpents.iter_mut().filter(|s| s.is_alive()) {
            if self.food.consume(serpent.head()) {
                serpent.request_growth();
                ate[serpent.id().index()] = true;
                debug!(serpent = %serpent.id(), cell = ?serpent.head(), "food eaten");
            }
        }

        let alive = self.serpents.each_ref().map(Serpent::is_alive);
        let round_over = alive.contains(&false);

        let mut spawned = Vec::new();
        if round_over {
            self.pending_spawns = 0;
            if let Err(err) = self.coordinator.end_round() {
                warn!(%err, "round end rejected");
            }
            info!(
                tick = self.tick,
                round = self.coordinator.round(),
                serpent_1_alive = alive[0],
                serpent_2_alive = alive[1],
                "round over"
            );
        } else {
            while self.pending_spawns > 0 {
                self.pending_spawns -= 1;
                match self.free_cell() {
                    Some(cell) => {
                        self.food.spawn(cell);
                        spawned.push(cell);
                        debug!(?cell, "food spawned");
                    }
                    None => warn!("no free cell left for food"),
                }
            }
        }

        Some(TickOutcome {
            tick: self.tick,
            ate,
            alive,
            spawned,
            round_over,
        })
    }

    /// Hand the frozen round to the resolver
    pub fn begin_resolution(&mut self) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::MatchOver);
        }
        self.coordinator.begin_resolution()
    }

    /// Decide the round, charge lives, reset the board for the next round
    pub fn resolve_round(&mut self) -> Result<RoundResult, GameError> {
        if self.game_over {
            return Err(GameError::MatchOver);
        }
        if self.coordinator.phase() != RoundPhase::Resolving {
            return Err(GameError::InvalidTransition {
                action: "resolve the round",
                phase: self.coordinator.phase(),
            });
        }

        let round = self.coordinator.round();
        let verdict = Verdict::from_alive(
            self.serpents[0].is_alive(),
            self.serpents[1].is_alive(),
        )
        .ok_or(GameError::NoCasualty { round })?;

        for loser in verdict.losers() {
            let lives = &mut self.lives[loser.index()];
            *lives = lives.saturating_sub(1);
        }
        self.game_over = self.lives.contains(&0);
        self.last_verdict = Some(verdict);

        for serpent in &mut self.serpents {
            serpent.reset();
        }
        self.food.reseed(self.grid.center());
        self.pending_spawns = 0;
        self.coordinator.finish_resolution()?;

        info!(
            round,
            verdict = verdict.label(),
            serpent_1_lives = self.lives[0],
            serpent_2_lives = self.lives[1],
            game_over = self.game_over,
            "round resolved"
        );
        if let Some(winner) = self.winner() {
            info!(winner = winner.label(), "match over");
        }

        Ok(RoundResult {
            round,
            verdict,
            lives: self.lives,
            game_over: self.game_over,
        })
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            grid_size: self.grid.size(),
            tick: self.tick,
            round: self.coordinator.round(),
            status: self.status(),
            phase: self.coordinator.phase(),
            serpents: self.serpents.each_ref().map(SerpentView::from),
            food: self.food.cells().to_vec(),
            lives: self.lives,
            last_verdict: self.last_verdict,
            winner: self.winner(),
        }
    }

    fn is_free(&self, cell: Cell) -> bool {
        !self.serpents.iter().any(|s| s.occupies(cell))
    }

    /// Uniformly random cell off both serpents, if one exists
    fn free_cell(&mut self) -> Option<Cell> {
        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let cell = self.grid.random_cell(&mut self.rng);
            if self.is_free(cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = self.grid.cells().filter(|&c| self.is_free(c)).collect();
        if free.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..free.len());
        free.get(index).copied()
    }

    #[cfg(test)]
    pub(crate) fn serpent_mut(&mut self, id: SerpentId) -> &mut Serpent {
        &mut self.serpents[id.index()]
    }

    #[cfg(test)]
    pub(crate) fn food_mut(&mut self) -> &mut FoodRegistry {
        &mut self.food
    }
}
