//! Mouse-trailing smoke effect
//!
//! Pointer motion spawns short-lived particles. The live population is capped
//! and evicted oldest-first, every particle retires itself after its lifetime,
//! and a periodic sweep enforces a hard age ceiling in case a retire timer is
//! late or lost.

use crate::scheduler::{TimerId, TimerService};
use crate::types::Point;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub spawned_at_ms: u64,
    pub position: Point,
    pub size: f64,
    pub opacity: f64,
    pub lifetime_ms: u64,
    retire_timer: TimerId,
}

impl Particle {
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.spawned_at_ms)
    }
}

/// Where particles are drawn. The effect only issues parameters.
pub trait ParticleSurface {
    fn append_particle(&mut self, particle: &Particle);
    fn remove_particle(&mut self, id: ParticleId);
}

/// Timer work scheduled by the effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeTask {
    Retire(ParticleId),
    Sweep,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    pub max_particles: usize,
    pub min_move_distance: f64,
    /// Half-width of the positional jitter square
    pub jitter: f64,
    pub size: Range<f64>,
    pub opacity: Range<f64>,
    pub lifetime_ms: Range<u64>,
    pub sweep_interval_ms: u64,
    pub max_age_ms: u64,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        SmokeConfig {
            max_particles: 80,
            min_move_distance: 5.0,
            jitter: 20.0,
            size: 2.0..8.0,
            opacity: 0.1..1.0,
            lifetime_ms: 1000..1800,
            sweep_interval_ms: 100,
            max_age_ms: 2000,
        }
    }
}

impl SmokeConfig {
    /// Clamp values loaded from disk into something drawable
    pub fn sanitized(mut self) -> Self {
        self.max_particles = self.max_particles.min(crate::constants::MAX_PARTICLE_CAP);
        self.min_move_distance = self.min_move_distance.max(0.0);
        self.jitter = self.jitter.abs();
        if self.size.start > self.size.end {
            self.size = self.size.end..self.size.start;
        }
        self.opacity = self.opacity.start.clamp(0.0, 1.0)..self.opacity.end.clamp(0.0, 1.0);
        if self.lifetime_ms.start > self.lifetime_ms.end {
            self.lifetime_ms = self.lifetime_ms.end..self.lifetime_ms.start;
        }
        self.sweep_interval_ms = self.sweep_interval_ms.max(1);
        self
    }
}

pub struct SmokeEffect<S> {
    surface: S,
    config: SmokeConfig,
    // Spawn order, oldest at the front
    particles: VecDeque<Particle>,
    last_pointer: Point,
    next_id: u64,
    rng: fastrand::Rng,
}

impl<S: ParticleSurface> SmokeEffect<S> {
    /// Create the effect and register its periodic sweep
    pub fn new<T>(surface: S, config: SmokeConfig, timers: &mut impl TimerService<T>) -> Self
    where
        T: From<SmokeTask>,
    {
        Self::with_rng(surface, config, timers, fastrand::Rng::new())
    }

    /// Like [`SmokeEffect::new`] with a caller-provided random source
    pub fn with_rng<T>(
        surface: S,
        config: SmokeConfig,
        timers: &mut impl TimerService<T>,
        rng: fastrand::Rng,
    ) -> Self
    where
        T: From<SmokeTask>,
    {
        timers.set_interval(config.sweep_interval_ms, SmokeTask::Sweep.into());
        tracing::debug!(
            "Smoke effect started: cap={}, sweep every {}ms, max age {}ms",
            config.max_particles,
            config.sweep_interval_ms,
            config.max_age_ms
        );

        SmokeEffect {
            surface,
            config,
            particles: VecDeque::new(),
            last_pointer: Point::default(),
            next_id: 0,
            rng,
        }
    }

    /// Record a pointer position, spawning one particle if it moved far enough.
    ///
    /// Returns true if a particle was spawned.
    pub fn on_pointer_move<T>(&mut self, position: Point, timers: &mut impl TimerService<T>) -> bool
    where
        T: From<SmokeTask>,
    {
        let distance = self.last_pointer.distance_to(position);
        self.last_pointer = position;

        if distance > self.config.min_move_distance {
            self.spawn(position, timers)
        } else {
            false
        }
    }

    fn spawn<T>(&mut self, anchor: Point, timers: &mut impl TimerService<T>) -> bool
    where
        T: From<SmokeTask>,
    {
        if self.config.max_particles == 0 {
            return false;
        }

        while self.particles.len() >= self.config.max_particles {
            self.evict_oldest(timers);
        }

        let jitter = self.config.jitter;
        let position = Point {
            x: anchor.x + self.sample(-jitter..jitter),
            y: anchor.y + self.sample(-jitter..jitter),
        };
        let size = self.sample(self.config.size.clone());
        let opacity = self.sample(self.config.opacity.clone());
        let lifetime_ms = if self.config.lifetime_ms.is_empty() {
            self.config.lifetime_ms.start
        } else {
            self.rng.u64(self.config.lifetime_ms.clone())
        };

        let id = ParticleId(self.next_id);
        self.next_id += 1;

        let retire_timer = timers.set_timeout(lifetime_ms, SmokeTask::Retire(id).into());
        let particle = Particle {
            id,
            spawned_at_ms: timers.now_ms(),
            position,
            size,
            opacity,
            lifetime_ms,
            retire_timer,
        };

        self.surface.append_particle(&particle);
        self.particles.push_back(particle);
        true
    }

    fn sample(&mut self, range: Range<f64>) -> f64 {
        if range.is_empty() {
            return range.start;
        }
        range.start + self.rng.f64() * (range.end - range.start)
    }

    fn evict_oldest<T>(&mut self, timers: &mut impl TimerService<T>) {
        if let Some(oldest) = self.particles.pop_front() {
            timers.clear(oldest.retire_timer);
            self.surface.remove_particle(oldest.id);
        }
    }

    /// Run a task this effect scheduled
    pub fn handle<T>(&mut self, task: SmokeTask, timers: &mut impl TimerService<T>) {
        match task {
            SmokeTask::Retire(id) => self.retire(id),
            SmokeTask::Sweep => self.sweep(timers),
        }
    }

    fn retire(&mut self, id: ParticleId) {
        // Already evicted or swept: nothing to do
        if let Some(idx) = self.particles.iter().position(|p| p.id == id) {
            self.particles.remove(idx);
            self.surface.remove_particle(id);
        }
    }

    fn sweep<T>(&mut self, timers: &mut impl TimerService<T>) {
        let now = timers.now_ms();
        let max_age = self.config.max_age_ms;
        let before = self.particles.len();

        let surface = &mut self.surface;
        self.particles.retain(|particle| {
            if particle.age_ms(now) > max_age {
                timers.clear(particle.retire_timer);
                surface.remove_particle(particle.id);
                false
            } else {
                true
            }
        });

        let swept = before - self.particles.len();
        if swept > 0 {
            tracing::debug!("Sweep removed {} particles past {}ms", swept, max_age);
        }
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    /// Live particles, oldest first
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn last_pointer(&self) -> Point {
        self.last_pointer
    }

    pub fn config(&self) -> &SmokeConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TaskQueue;
    use std::collections::BTreeSet;

    #[derive(Default)]
    struct RecordingSurface {
        visible: BTreeSet<ParticleId>,
        removed: Vec<ParticleId>,
    }

    impl ParticleSurface for RecordingSurface {
        fn append_particle(&mut self, particle: &Particle) {
            self.visible.insert(particle.id);
        }

        fn remove_particle(&mut self, id: ParticleId) {
            self.visible.remove(&id);
            self.removed.push(id);
        }
    }

    fn create_effect(
        config: SmokeConfig,
    ) -> (SmokeEffect<RecordingSurface>, TaskQueue<SmokeTask>) {
        let mut timers = TaskQueue::<SmokeTask>::new();
        let effect = SmokeEffect::with_rng(
            RecordingSurface::default(),
            config,
            &mut timers,
            fastrand::Rng::with_seed(7),
        );
        (effect, timers)
    }

    fn run_until(
        effect: &mut SmokeEffect<RecordingSurface>,
        timers: &mut TaskQueue<SmokeTask>,
        until_ms: u64,
    ) {
        while let Some(task) = timers.poll(until_ms) {
            effect.handle(task, timers);
        }
    }

    /// Move right by 10px per step so every move qualifies
    fn sweep_right(
        effect: &mut SmokeEffect<RecordingSurface>,
        timers: &mut TaskQueue<SmokeTask>,
        moves: usize,
    ) {
        for i in 1..=moves {
            assert!(effect.on_pointer_move(Point::new(i as f64 * 10.0, 0.0), timers));
        }
    }

    #[test]
    fn test_small_moves_update_position_without_spawning() {
        let (mut effect, mut timers) = create_effect(SmokeConfig::default());

        assert!(effect.on_pointer_move(Point::new(10.0, 0.0), &mut timers));
        assert_eq!(effect.live_count(), 1);

        assert!(!effect.on_pointer_move(Point::new(10.0, 3.0), &mut timers));
        assert_eq!(effect.live_count(), 1);
        assert_eq!(effect.last_pointer(), Point::new(10.0, 3.0));
    }

    #[test]
    fn test_exact_threshold_does_not_spawn() {
        let (mut effect, mut timers) = create_effect(SmokeConfig::default());
        assert!(!effect.on_pointer_move(Point::new(3.0, 4.0), &mut timers));
    }

    #[test]
    fn test_cap_evicts_first_particle() {
        let (mut effect, mut timers) = create_effect(SmokeConfig::default());

        sweep_right(&mut effect, &mut timers, 80);
        let first = effect.particles().next().map(|p| p.id).unwrap();

        assert!(effect.on_pointer_move(Point::new(810.0, 0.0), &mut timers));

        assert_eq!(effect.live_count(), 80);
        assert!(effect.particles().all(|p| p.id != first));
        assert!(!effect.surface().visible.contains(&first));
        assert_eq!(effect.surface().removed, vec![first]);
    }

    #[test]
    fn test_cap_never_exceeded_and_eviction_is_fifo() {
        let config = SmokeConfig {
            max_particles: 5,
            ..SmokeConfig::default()
        };
        let (mut effect, mut timers) = create_effect(config);

        for i in 1..=40u64 {
            run_until(&mut effect, &mut timers, i * 7);
            let live_before: Vec<_> = effect.particles().map(|p| p.id).collect();

            effect.on_pointer_move(Point::new(i as f64 * 10.0, 0.0), &mut timers);
            assert!(effect.live_count() <= 5);

            if live_before.len() == 5 {
                // The evicted particle is the earliest spawned survivor
                let live_after: Vec<_> = effect.particles().map(|p| p.id).collect();
                assert!(!live_after.contains(&live_before[0]));
                assert_eq!(&live_after[..4], &live_before[1..]);
            }
        }
    }

    #[test]
    fn test_eviction_cancels_retire_timer() {
        let config = SmokeConfig {
            max_particles: 1,
            ..SmokeConfig::default()
        };
        let (mut effect, mut timers) = create_effect(config);

        sweep_right(&mut effect, &mut timers, 1);
        // sweep interval + one retire timer
        assert_eq!(timers.pending(), 2);

        assert!(effect.on_pointer_move(Point::new(20.0, 0.0), &mut timers));
        assert_eq!(timers.pending(), 2);
    }

    #[test]
    fn test_particles_retire_after_lifetime() {
        let (mut effect, mut timers) = create_effect(SmokeConfig::default());
        sweep_right(&mut effect, &mut timers, 10);

        run_until(&mut effect, &mut timers, 999);
        assert_eq!(effect.live_count(), 10);

        run_until(&mut effect, &mut timers, 1_800);
        assert_eq!(effect.live_count(), 0);
        assert!(effect.surface().visible.is_empty());
        // only the sweep interval remains
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_sweep_enforces_age_ceiling() {
        // Lifetimes far beyond the ceiling, so only the sweep can remove them
        let config = SmokeConfig {
            lifetime_ms: 10_000..20_000,
            ..SmokeConfig::default()
        };
        let (mut effect, mut timers) = create_effect(config);
        sweep_right(&mut effect, &mut timers, 20);

        run_until(&mut effect, &mut timers, 2_000);
        assert_eq!(effect.live_count(), 20);

        run_until(&mut effect, &mut timers, 2_100);
        assert_eq!(effect.live_count(), 0);
        assert_eq!(timers.pending(), 1);
    }

    #[test]
    fn test_no_particle_outlives_ceiling_under_continuous_motion() {
        let config = SmokeConfig {
            lifetime_ms: 5_000..9_000,
            ..SmokeConfig::default()
        };
        let (mut effect, mut timers) = create_effect(config);

        for step in 1..=300u64 {
            let now = step * 16;
            run_until(&mut effect, &mut timers, now);
            effect.on_pointer_move(Point::new((step % 50) as f64 * 12.0, 0.0), &mut timers);

            let ceiling = effect.config().max_age_ms + effect.config().sweep_interval_ms;
            assert!(effect.particles().all(|p| p.age_ms(now) <= ceiling));
            assert!(effect.live_count() <= 80);
        }
    }

    #[test]
    fn test_stale_retire_is_a_no_op() {
        let (mut effect, mut timers) = create_effect(SmokeConfig::default());
        sweep_right(&mut effect, &mut timers, 1);
        let id = effect.particles().next().unwrap().id;

        effect.handle(SmokeTask::Retire(id), &mut timers);
        effect.handle(SmokeTask::Retire(id), &mut timers);

        assert_eq!(effect.live_count(), 0);
        assert_eq!(effect.surface().removed, vec![id]);
    }

    #[test]
    fn test_spawn_parameters_stay_in_bounds() {
        let (mut effect, mut timers) = create_effect(SmokeConfig::default());

        for i in 1..=50 {
            let anchor = Point::new(i as f64 * 10.0, 100.0);
            effect.on_pointer_move(anchor, &mut timers);
            let p = effect.particles().last().unwrap();

            assert!((p.position.x - anchor.x).abs() <= 20.0);
            assert!((p.position.y - anchor.y).abs() <= 20.0);
            assert!((2.0..8.0).contains(&p.size));
            assert!((0.1..1.0).contains(&p.opacity));
            assert!((1000..1800).contains(&p.lifetime_ms));
        }
    }

    #[test]
    fn test_zero_cap_spawns_nothing() {
        let config = SmokeConfig {
            max_particles: 0,
            ..SmokeConfig::default()
        };
        let (mut effect, mut timers) = create_effect(config);

        assert!(!effect.on_pointer_move(Point::new(100.0, 100.0), &mut timers));
        assert_eq!(effect.live_count(), 0);
        assert_eq!(effect.last_pointer(), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_sanitized_clamps_and_orders_ranges() {
        let config = SmokeConfig {
            max_particles: 10_000,
            size: 9.0..1.0,
            opacity: -1.0..3.0,
            sweep_interval_ms: 0,
            ..SmokeConfig::default()
        }
        .sanitized();

        assert_eq!(config.max_particles, crate::constants::MAX_PARTICLE_CAP);
        assert_eq!(config.size, 1.0..9.0);
        assert_eq!(config.opacity, 0.0..1.0);
        assert_eq!(config.sweep_interval_ms, 1);
    }
}
