//! Per-tick particle advancement.
//!
//! The integrator runs one fixed-order pass over the whole store:
//! aging and connection reset, force accumulation, behavior strategies,
//! position integration, friction, boundary policy — then a single cull of
//! the dead. Death removal never happens mid-pass, so the pass order never
//! perturbs iteration of the remaining particles within a tick.

use crate::behavior::Behavior;
use crate::config::{BoundaryPolicy, SimulationConfig};
use crate::forces::ForceSpec;
use crate::particle::Particle;
use crate::store::ParticleStore;

/// Stateless tick pass over a [`ParticleStore`].
pub struct Integrator;

impl Integrator {
    /// Advances every particle by one tick and culls the dead.
    ///
    /// Returns the number of particles removed. The per-particle order is
    /// fixed (it affects only floating-point accumulation, not semantics):
    /// age+reset, forces, behaviors, `pos += vel`, `vel *= friction`,
    /// boundary policy.
    pub fn step(
        store: &mut ParticleStore,
        config: &SimulationConfig,
        forces: &[ForceSpec],
        behaviors: &[Box<dyn Behavior>],
    ) -> usize {
        for particle in store.particles_mut() {
            particle.age += 1;
            particle.connections = 0;

            for spec in forces {
                let delta = spec.delta(particle);
                particle.vel += delta;
            }
            for behavior in behaviors {
                behavior.apply(particle);
            }

            particle.pos += particle.vel;
            particle.vel *= config.friction;

            apply_boundary(particle, config);
        }
        store.cull_dead()
    }
}

/// Applies the configured boundary policy to one particle, per axis.
fn apply_boundary(particle: &mut Particle, config: &SimulationConfig) {
    match config.boundary {
        BoundaryPolicy::Wrap => {
            particle.pos.x = wrap_coord(particle.pos.x, config.width);
            particle.pos.y = wrap_coord(particle.pos.y, config.height);
        }
        BoundaryPolicy::Bounce => {
            if particle.pos.x < 0.0 || particle.pos.x > config.width {
                particle.vel.x = -particle.vel.x;
            }
            if particle.pos.y < 0.0 || particle.pos.y > config.height {
                particle.vel.y = -particle.vel.y;
            }
        }
        BoundaryPolicy::Clamp => {
            if particle.pos.x < 0.0 || particle.pos.x > config.width {
                particle.pos.x = particle.pos.x.clamp(0.0, config.width);
                particle.vel.x = 0.0;
            }
            if particle.pos.y < 0.0 || particle.pos.y > config.height {
                particle.pos.y = particle.pos.y.clamp(0.0, config.height);
                particle.vel.y = 0.0;
            }
        }
    }
}

/// Teleports an out-of-range coordinate to the opposite edge.
///
/// Overshoot distance is discarded (re-entry at the edge itself), matching
/// the wrap semantics of the boundary policy table: a particle at
/// `width + 1` re-enters at `0`.
fn wrap_coord(coord: f64, dimension: f64) -> f64 {
    if coord > dimension {
        0.0
    } else if coord < 0.0 {
        dimension
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::RadiusDecay;
    use crate::forces::ForceKind;
    use crate::particle::SpawnOptions;
    use crate::prng::SplitMix64;
    use glam::DVec2;

    fn config() -> SimulationConfig {
        SimulationConfig {
            friction: 0.98,
            width: 800.0,
            height: 600.0,
            ..Default::default()
        }
    }

    fn store_with(particles: &[(DVec2, DVec2)], capacity: usize) -> ParticleStore {
        let mut store = ParticleStore::new(capacity);
        let mut rng = SplitMix64::new(42);
        for (pos, vel) in particles {
            let options = SpawnOptions {
                velocity: Some(*vel),
                radius: Some(2.0),
                ..Default::default()
            };
            store.spawn(pos.x, pos.y, &options, &mut rng);
        }
        store
    }

    #[test]
    fn tick_ages_every_particle_by_one() {
        let mut store = store_with(
            &[(DVec2::new(10.0, 10.0), DVec2::ZERO); 5],
            10,
        );
        Integrator::step(&mut store, &config(), &[], &[]);
        assert!(store.particles().iter().all(|p| p.age == 1));
        Integrator::step(&mut store, &config(), &[], &[]);
        assert!(store.particles().iter().all(|p| p.age == 2));
    }

    #[test]
    fn tick_resets_connection_counts() {
        let mut store = store_with(&[(DVec2::new(10.0, 10.0), DVec2::ZERO)], 10);
        store.particles_mut()[0].connections = 7;
        Integrator::step(&mut store, &config(), &[], &[]);
        assert_eq!(store.particles()[0].connections, 0);
    }

    #[test]
    fn position_integrates_before_friction() {
        let mut store = store_with(&[(DVec2::new(100.0, 100.0), DVec2::new(10.0, 0.0))], 10);
        Integrator::step(&mut store, &config(), &[], &[]);
        let p = &store.particles()[0];
        // Full velocity moves the particle, then friction damps it.
        assert!((p.pos.x - 110.0).abs() < 1e-12);
        assert!((p.vel.x - 9.8).abs() < 1e-12);
    }

    #[test]
    fn velocity_decays_geometrically_with_no_forces() {
        let mut store = store_with(&[(DVec2::new(400.0, 300.0), DVec2::new(4.0, 3.0))], 10);
        let cfg = config();
        let v0 = store.particles()[0].vel.length();
        for _ in 0..20 {
            Integrator::step(&mut store, &cfg, &[], &[]);
        }
        let expected = v0 * cfg.friction.powi(20);
        let got = store.particles()[0].vel.length();
        assert!(
            (got - expected).abs() < 1e-9,
            "expected |v| {expected}, got {got}"
        );
    }

    #[test]
    fn forces_accumulate_additively() {
        let mut store = store_with(&[(DVec2::new(0.0, 0.0), DVec2::ZERO)], 10);
        let target = DVec2::new(100.0, 0.0);
        let one = [ForceSpec::new(ForceKind::Attract, target, 1.0)];
        let two = [
            ForceSpec::new(ForceKind::Attract, target, 1.0),
            ForceSpec::new(ForceKind::Attract, target, 1.0),
        ];
        let mut store2 = store.clone();
        Integrator::step(&mut store, &config(), &one, &[]);
        Integrator::step(&mut store2, &config(), &two, &[]);
        let v1 = store.particles()[0].vel.x;
        let v2 = store2.particles()[0].vel.x;
        assert!((v2 - 2.0 * v1).abs() < 1e-9, "v1={v1} v2={v2}");
    }

    #[test]
    fn behaviors_run_every_tick() {
        let mut store = store_with(&[(DVec2::new(100.0, 100.0), DVec2::ZERO)], 10);
        let behaviors: Vec<Box<dyn Behavior>> = vec![Box::new(RadiusDecay { rate: 0.5 })];
        Integrator::step(&mut store, &config(), &[], &behaviors);
        assert!((store.particles()[0].radius - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wrap_teleports_to_opposite_edge_with_velocity_unchanged() {
        let cfg = SimulationConfig {
            boundary: BoundaryPolicy::Wrap,
            ..config()
        };
        // x = 799 + 2 = 801 > 800 after integration.
        let mut store = store_with(&[(DVec2::new(799.0, 300.0), DVec2::new(2.0, 0.0))], 10);
        Integrator::step(&mut store, &cfg, &[], &[]);
        let p = &store.particles()[0];
        assert!((p.pos.x - 0.0).abs() < 1e-12, "x should wrap to 0, got {}", p.pos.x);
        assert!((p.pos.y - 300.0).abs() < 1e-12, "y must be unchanged");
        assert!((p.vel.x - 2.0 * cfg.friction).abs() < 1e-12, "wrap must not touch velocity");
    }

    #[test]
    fn wrap_negative_coordinate_reenters_at_far_edge() {
        let cfg = SimulationConfig {
            boundary: BoundaryPolicy::Wrap,
            ..config()
        };
        let mut store = store_with(&[(DVec2::new(1.0, 300.0), DVec2::new(-3.0, 0.0))], 10);
        Integrator::step(&mut store, &cfg, &[], &[]);
        assert!((store.particles()[0].pos.x - 800.0).abs() < 1e-12);
    }

    #[test]
    fn bounce_inverts_velocity_component_and_keeps_position() {
        let cfg = SimulationConfig {
            boundary: BoundaryPolicy::Bounce,
            ..config()
        };
        let mut store = store_with(&[(DVec2::new(799.0, 300.0), DVec2::new(5.0, 1.0))], 10);
        Integrator::step(&mut store, &cfg, &[], &[]);
        let p = &store.particles()[0];
        assert!((p.pos.x - 804.0).abs() < 1e-12, "bounce leaves position as computed");
        assert!(p.vel.x < 0.0, "x velocity must invert");
        assert!((p.vel.x + 5.0 * cfg.friction).abs() < 1e-12);
        assert!(p.vel.y > 0.0, "y velocity untouched");
    }

    #[test]
    fn bounce_returns_particle_on_next_tick() {
        let cfg = SimulationConfig {
            boundary: BoundaryPolicy::Bounce,
            ..config()
        };
        let mut store = store_with(&[(DVec2::new(799.0, 300.0), DVec2::new(5.0, 0.0))], 10);
        Integrator::step(&mut store, &cfg, &[], &[]);
        Integrator::step(&mut store, &cfg, &[], &[]);
        assert!(store.particles()[0].pos.x < 800.0, "second tick moves back inside");
    }

    #[test]
    fn clamp_clips_coordinate_and_zeroes_component() {
        let cfg = SimulationConfig {
            boundary: BoundaryPolicy::Clamp,
            ..config()
        };
        let mut store = store_with(&[(DVec2::new(799.0, 1.0), DVec2::new(5.0, -4.0))], 10);
        Integrator::step(&mut store, &cfg, &[], &[]);
        let p = &store.particles()[0];
        assert!((p.pos.x - 800.0).abs() < 1e-12);
        assert!((p.vel.x - 0.0).abs() < f64::EPSILON);
        assert!((p.pos.y - 0.0).abs() < 1e-12);
        assert!((p.vel.y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn expired_particles_are_culled_after_the_pass() {
        let mut store = ParticleStore::new(10);
        let mut rng = SplitMix64::new(42);
        let short = SpawnOptions {
            life: Some(1),
            velocity: Some(DVec2::ZERO),
            ..Default::default()
        };
        let long = SpawnOptions {
            velocity: Some(DVec2::ZERO),
            ..Default::default()
        };
        store.spawn(100.0, 100.0, &short, &mut rng);
        store.spawn(200.0, 200.0, &long, &mut rng);
        let removed = Integrator::step(&mut store, &config(), &[], &[]);
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.particles()[0].life.is_none());
    }

    #[test]
    fn surviving_particles_still_advance_on_a_culling_tick() {
        let mut store = ParticleStore::new(10);
        let mut rng = SplitMix64::new(42);
        let doomed = SpawnOptions {
            life: Some(1),
            velocity: Some(DVec2::ZERO),
            ..Default::default()
        };
        let mover = SpawnOptions {
            velocity: Some(DVec2::new(1.0, 0.0)),
            ..Default::default()
        };
        store.spawn(100.0, 100.0, &doomed, &mut rng);
        store.spawn(200.0, 200.0, &mover, &mut rng);
        Integrator::step(&mut store, &config(), &[], &[]);
        let p = &store.particles()[0];
        assert!((p.pos.x - 201.0).abs() < 1e-12, "survivor must have integrated");
        assert_eq!(p.age, 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn geometric_decay_over_n_ticks(
                vx in -10.0_f64..10.0,
                vy in -10.0_f64..10.0,
                friction in 0.5_f64..1.0,
                ticks in 1_usize..50,
            ) {
                let cfg = SimulationConfig {
                    friction,
                    boundary: BoundaryPolicy::Wrap,
                    ..SimulationConfig::default()
                };
                let mut store = store_with(
                    &[(DVec2::new(400.0, 300.0), DVec2::new(vx, vy))],
                    4,
                );
                let v0 = store.particles()[0].vel.length();
                for _ in 0..ticks {
                    Integrator::step(&mut store, &cfg, &[], &[]);
                }
                let expected = v0 * friction.powi(ticks as i32);
                let got = store.particles()[0].vel.length();
                prop_assert!(
                    (got - expected).abs() < 1e-6 * (1.0 + expected),
                    "expected {expected}, got {got}"
                );
            }

            #[test]
            fn positions_stay_finite_under_all_policies(
                x in 0.0_f64..800.0,
                y in 0.0_f64..600.0,
                vx in -50.0_f64..50.0,
                vy in -50.0_f64..50.0,
                policy in prop::sample::select(vec![
                    BoundaryPolicy::Wrap,
                    BoundaryPolicy::Bounce,
                    BoundaryPolicy::Clamp,
                ]),
            ) {
                let cfg = SimulationConfig {
                    boundary: policy,
                    ..config()
                };
                let mut store =
                    store_with(&[(DVec2::new(x, y), DVec2::new(vx, vy))], 4);
                for _ in 0..30 {
                    Integrator::step(&mut store, &cfg, &[], &[]);
                }
                let p = &store.particles()[0];
                prop_assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
                prop_assert!(p.vel.x.is_finite() && p.vel.y.is_finite());
            }

            #[test]
            fn wrap_and_clamp_keep_particles_inside_after_settling(
                x in 0.0_f64..800.0,
                y in 0.0_f64..600.0,
                vx in -20.0_f64..20.0,
                vy in -20.0_f64..20.0,
            ) {
                for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Clamp] {
                    let cfg = SimulationConfig {
                        boundary: policy,
                        ..config()
                    };
                    let mut store =
                        store_with(&[(DVec2::new(x, y), DVec2::new(vx, vy))], 4);
                    for _ in 0..5 {
                        Integrator::step(&mut store, &cfg, &[], &[]);
                    }
                    let p = &store.particles()[0];
                    prop_assert!(
                        (0.0..=800.0).contains(&p.pos.x)
                            && (0.0..=600.0).contains(&p.pos.y),
                        "{:?} escaped under {:?}", p.pos, policy
                    );
                }
            }
        }
    }
}
