//! One frame of the game, for every agent of a generation at once.
//!
//! A step runs in a fixed order:
//!
//! 1. **Steer** - Each live agent's pilot maps its sensor reading to a
//!    steering output; the agent moves and is clamped to the playfield
//! 2. **Obstacles** - The obstacle stream spawns, falls and culls
//! 3. **Collisions** - A live agent touching any obstacle dies and is
//!    penalized once; every other live agent earns the survival reward and
//!    the score increment
//! 4. **Leader** - The live agent with the highest score (lowest index on
//!    ties) earns the leader bonus
//!
//! Agent `i` is steered by pilot `i` and credits ledger slot `i`.

use std::time::Duration;

use dodger_engine::{Agent, Entity as _, SensorReading, Steering, StreamStep, World};
use dodger_neat::{FeedForwardNetwork, Genome};

use crate::fitness::FitnessPolicy;

/// Turns a sensor reading into a steering output.
///
/// The sign of the output decides the direction; see
/// [`Steering::from_output`].
pub trait Pilot {
    fn steer(&mut self, reading: &SensorReading) -> f32;
}

impl Pilot for FeedForwardNetwork {
    fn steer(&mut self, reading: &SensorReading) -> f32 {
        self.activate(&reading.to_inputs())
            .first()
            .copied()
            .unwrap_or_default()
    }
}

impl<P> Pilot for Box<P>
where
    P: Pilot + ?Sized,
{
    fn steer(&mut self, reading: &SensorReading) -> f32 {
        (**self).steer(reading)
    }
}

/// Where fitness deltas are credited, one slot per agent.
pub trait FitnessLedger {
    /// Number of slots available.
    fn slots(&self) -> usize;
    fn credit(&mut self, index: usize, delta: f32);
}

impl FitnessLedger for [f32] {
    fn slots(&self) -> usize {
        self.len()
    }

    fn credit(&mut self, index: usize, delta: f32) {
        self[index] += delta;
    }
}

impl FitnessLedger for [Genome] {
    fn slots(&self) -> usize {
        self.len()
    }

    fn credit(&mut self, index: usize, delta: f32) {
        self[index].add_fitness(delta);
    }
}

/// The live agent with the highest score in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leader {
    pub index: usize,
    pub score: f64,
}

/// What happened during one [`Simulation::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// 1-based number of the frame just simulated.
    pub frame: u64,
    /// Indices of the agents that died in this frame.
    pub deaths: Vec<usize>,
    /// Agents still alive after the frame.
    pub alive: usize,
    /// `None` once every agent is dead.
    pub leader: Option<Leader>,
    pub obstacles: StreamStep,
}

/// A world plus the agents of one generation.
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    agents: Vec<Agent>,
    policy: FitnessPolicy,
    tick: Duration,
    frame: u64,
    best: Option<Leader>,
}

impl Simulation {
    /// Spawns `agent_count` agents at the world's spawn point.
    #[must_use]
    pub fn new(world: World, agent_count: usize, policy: FitnessPolicy, tick: Duration) -> Self {
        let agents = (0..agent_count).map(|_| world.spawn_agent()).collect();
        Self::with_agents(world, agents, policy, tick)
    }

    #[must_use]
    pub fn with_agents(
        world: World,
        agents: Vec<Agent>,
        policy: FitnessPolicy,
        tick: Duration,
    ) -> Self {
        Self {
            world,
            agents,
            policy,
            tick,
            frame: 0,
            best: None,
        }
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Frames simulated so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|agent| agent.is_alive()).count()
    }

    /// Highest leader score seen so far and the agent that held it.
    #[must_use]
    pub fn best(&self) -> Option<Leader> {
        self.best
    }

    /// Simulates one frame.
    ///
    /// # Panics
    ///
    /// Panics if `pilots` and the agents differ in length, or if `ledger` has
    /// fewer slots than there are agents.
    pub fn step<P, L>(&mut self, pilots: &mut [P], ledger: &mut L) -> StepReport
    where
        P: Pilot,
        L: FitnessLedger + ?Sized,
    {
        assert_eq!(
            pilots.len(),
            self.agents.len(),
            "every agent needs exactly one pilot"
        );
        assert!(
            ledger.slots() >= self.agents.len(),
            "fitness ledger has {} slots for {} agents",
            ledger.slots(),
            self.agents.len(),
        );

        let settings = self.world.settings();
        for (agent, pilot) in self.agents.iter_mut().zip(pilots) {
            if !agent.is_alive() {
                continue;
            }
            let reading = self.world.sense(agent);
            let steering = Steering::from_output(pilot.steer(&reading));
            agent.advance(steering, settings);
        }

        let obstacles = self.world.advance_obstacles(self.tick);

        let mut deaths = vec![];
        for (i, agent) in self.agents.iter_mut().enumerate() {
            if !agent.is_alive() {
                continue;
            }
            if self.world.collides(agent) {
                agent.kill();
                ledger.credit(i, self.policy.collision_penalty);
                deaths.push(i);
            } else {
                ledger.credit(i, self.policy.survival_reward);
                agent.add_score(self.policy.score_increment);
            }
        }

        let leader = self.leader();
        if let Some(leader) = leader {
            ledger.credit(leader.index, self.policy.leader_bonus);
            if self.best.is_none_or(|best| leader.score > best.score) {
                self.best = Some(leader);
            }
        }

        self.frame += 1;
        StepReport {
            frame: self.frame,
            deaths,
            alive: self.alive_count(),
            leader,
            obstacles,
        }
    }

    /// First live agent with the strictly highest score.
    fn leader(&self) -> Option<Leader> {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.is_alive())
            .fold(None, |leader: Option<Leader>, (index, agent)| match leader {
                Some(leader) if leader.score >= agent.score() => Some(leader),
                _ => Some(Leader {
                    index,
                    score: agent.score(),
                }),
            })
    }
}

#[cfg(test)]
mod tests {
    use dodger_engine::{Obstacle, Rect, WorldSettings};
    use dodger_neat::GenomeId;

    use super::*;

    struct Constant(f32);

    impl Pilot for Constant {
        fn steer(&mut self, _: &SensorReading) -> f32 {
            self.0
        }
    }

    fn quiet_world() -> World {
        let settings = WorldSettings {
            spawn_interval: Duration::from_secs(3600),
            ..WorldSettings::default()
        };
        World::new(settings, 0)
    }

    fn tick() -> Duration {
        Duration::from_secs(1) / 30
    }

    #[test]
    fn test_pilot_output_moves_agents() {
        let mut sim = Simulation::new(quiet_world(), 3, FitnessPolicy::default(), tick());
        let mut pilots = [Constant(-0.5), Constant(0.0), Constant(0.5)];
        let mut ledger = [0.0_f32; 3];
        sim.step(&mut pilots, &mut ledger[..]);
        let lefts: Vec<_> = sim.agents().iter().map(|a| a.rect().left()).collect();
        assert_eq!(lefts, vec![225.0, 230.0, 235.0]);
    }

    #[test]
    fn test_agents_stay_inside_playfield() {
        let mut sim = Simulation::new(quiet_world(), 2, FitnessPolicy::default(), tick());
        let mut pilots = [Constant(-1.0), Constant(1.0)];
        let mut ledger = [0.0_f32; 2];
        for _ in 0..200 {
            sim.step(&mut pilots, &mut ledger[..]);
            for agent in sim.agents() {
                assert!(agent.rect().left() >= 0.0);
                assert!(agent.rect().right() <= 500.0);
            }
        }
        assert_eq!(sim.agents()[0].rect().left(), 0.0);
        assert_eq!(sim.agents()[1].rect().right(), 500.0);
    }

    #[test]
    fn test_survival_and_leader_bonus() {
        let mut sim = Simulation::new(quiet_world(), 3, FitnessPolicy::default(), tick());
        let mut pilots = [Constant(0.0), Constant(0.0), Constant(0.0)];
        let mut ledger = [0.0_f32; 3];
        let report = sim.step(&mut pilots, &mut ledger[..]);
        assert_eq!(report.frame, 1);
        assert_eq!(report.alive, 3);
        assert!(report.deaths.is_empty());
        assert_eq!(report.leader.map(|l| l.index), Some(0));
        assert_eq!(ledger, [3.0, 1.0, 1.0]);
        assert!(sim.agents().iter().all(|a| (a.score() - 0.1).abs() < 1e-12));
    }

    #[test]
    fn test_collision_penalized_once() {
        let mut sim = Simulation::new(quiet_world(), 2, FitnessPolicy::default(), tick());
        // overlaps agent 0 only after it moves left
        sim.world_mut()
            .push_obstacle(Obstacle::new(Rect::new(222.0, 630.0, 4.0, 20.0), 0.0));
        let mut pilots = [Constant(-1.0), Constant(0.0)];
        let mut ledger = [0.0_f32; 2];

        let report = sim.step(&mut pilots, &mut ledger[..]);
        assert_eq!(report.deaths, vec![0]);
        assert_eq!(report.alive, 1);
        assert_eq!(report.leader.map(|l| l.index), Some(1));
        assert_eq!(ledger, [-100.0, 3.0]);

        for _ in 0..5 {
            sim.step(&mut pilots, &mut ledger[..]);
        }
        assert_eq!(ledger[0], -100.0);
        assert_eq!(sim.agents()[0].score(), 0.0);
        assert_eq!(sim.agents()[0].rect().left(), 225.0);
    }

    #[test]
    fn test_no_leader_when_all_dead() {
        let mut sim = Simulation::new(quiet_world(), 2, FitnessPolicy::default(), tick());
        sim.world_mut()
            .push_obstacle(Obstacle::new(Rect::new(0.0, 600.0, 500.0, 100.0), 0.0));
        let mut pilots = [Constant(0.0), Constant(0.0)];
        let mut ledger = [0.0_f32; 2];
        let report = sim.step(&mut pilots, &mut ledger[..]);
        assert_eq!(report.alive, 0);
        assert_eq!(report.leader, None);
        assert_eq!(ledger, [-100.0, -100.0]);
        assert_eq!(sim.best(), None);
    }

    #[test]
    fn test_best_tracks_highest_leader_score() {
        let mut sim = Simulation::new(quiet_world(), 1, FitnessPolicy::default(), tick());
        let mut pilots = [Constant(0.0)];
        let mut ledger = [0.0_f32; 1];
        for _ in 0..10 {
            sim.step(&mut pilots, &mut ledger[..]);
        }
        let best = sim.best().unwrap();
        assert_eq!(best.index, 0);
        assert!((best.score - 1.0).abs() < 1e-9);
        assert_eq!(ledger[0], 30.0);
    }

    #[test]
    fn test_genomes_as_ledger() {
        let mut sim = Simulation::new(quiet_world(), 2, FitnessPolicy::default(), tick());
        let mut pilots = [Constant(0.0), Constant(0.0)];
        let mut genomes = [
            Genome::new(GenomeId::from(0), vec![]),
            Genome::new(GenomeId::from(1), vec![]),
        ];
        sim.step(&mut pilots, &mut genomes[..]);
        assert_eq!(genomes[0].fitness(), 3.0);
        assert_eq!(genomes[1].fitness(), 1.0);
    }

    #[test]
    #[should_panic(expected = "every agent needs exactly one pilot")]
    fn test_pilot_count_mismatch_panics() {
        let mut sim = Simulation::new(quiet_world(), 2, FitnessPolicy::default(), tick());
        let mut ledger = [0.0_f32; 2];
        sim.step(&mut [Constant(0.0)], &mut ledger[..]);
    }

    #[test]
    #[should_panic(expected = "fitness ledger has 1 slots for 2 agents")]
    fn test_short_ledger_panics() {
        let mut sim = Simulation::new(quiet_world(), 2, FitnessPolicy::default(), tick());
        let mut ledger = [0.0_f32; 1];
        sim.step(&mut [Constant(0.0), Constant(0.0)], &mut ledger[..]);
    }
}
