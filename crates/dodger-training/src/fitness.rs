/// Rewards and penalties credited during a generation.
///
/// Fitness (credited to genomes) and score (kept by agents) are separate:
/// score only ever grows while an agent survives, fitness also absorbs the
/// collision penalty and the leader bonus.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessPolicy {
    /// Fitness credited once, on the frame an agent collides.
    pub collision_penalty: f32,
    /// Fitness credited to every agent surviving a frame.
    pub survival_reward: f32,
    /// Score added to every agent surviving a frame.
    pub score_increment: f64,
    /// Fitness credited each frame to the agent with the highest score.
    pub leader_bonus: f32,
}

impl Default for FitnessPolicy {
    fn default() -> Self {
        Self {
            collision_penalty: -100.0,
            survival_reward: 1.0,
            score_increment: 0.1,
            leader_bonus: 2.0,
        }
    }
}
