//! Unit tests for rn-core.

#[cfg(test)]
mod ids {
    use crate::{ConnectionId, NodeId, VehicleId};

    #[test]
    fn invalid_sentinel() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert_eq!(VehicleId::default(), VehicleId::INVALID);
    }

    #[test]
    fn ordering_and_index() {
        let a = ConnectionId(3);
        let b = ConnectionId(7);
        assert!(a < b);
        assert_eq!(b.index(), 7);
        assert_eq!(usize::from(a), 3);
    }

    #[test]
    fn display_names_the_type() {
        assert_eq!(NodeId(5).to_string(), "NodeId(5)");
    }
}

#[cfg(test)]
mod vec3 {
    use crate::Vec3;

    #[test]
    fn distance_on_ground_plane() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 0.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_sq(b), 25.0);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(10.0, 0.0, 20.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec3::new(5.0, 0.0, 10.0));
    }

    #[test]
    fn normalized_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
        let unit = Vec3::new(0.0, 0.0, 8.0).normalized();
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn yaw_follows_xz() {
        // +X direction → 0 rad; +Z direction → π/2.
        assert_eq!(Vec3::new(1.0, 0.0, 0.0).yaw(), 0.0);
        let half_pi = std::f32::consts::FRAC_PI_2;
        assert!((Vec3::new(0.0, 0.0, 1.0).yaw() - half_pi).abs() < 1e-6);
    }

    #[test]
    fn perp_is_orthogonal() {
        let d = Vec3::new(1.0, 0.0, 2.0);
        let p = d.perp_xz();
        assert_eq!(d.x * p.x + d.z * p.z, 0.0);
    }
}

#[cfg(test)]
mod clock {
    use crate::SimClock;

    #[test]
    fn advance_accumulates() {
        let mut clock = SimClock::new();
        for _ in 0..120 {
            clock.advance(1.0 / 60.0);
        }
        assert_eq!(clock.frame, 120);
        assert!((clock.elapsed_secs - 2.0).abs() < 1e-6);
    }

    #[test]
    fn hms_breakdown() {
        let mut clock = SimClock::new();
        clock.advance(3_725.0); // 1 h 2 min 5 s in one giant step
        assert_eq!(clock.elapsed_hms(), (1, 2, 5));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..32 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(2);
        let va: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let vb: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_ne!(va, vb);
    }

    #[test]
    fn child_streams_are_independent() {
        let mut root = SimRng::new(7);
        let mut c1 = root.child(1);
        let mut c2 = root.child(2);
        assert_ne!(c1.random::<u64>(), c2.random::<u64>());
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}

#[cfg(test)]
mod config {
    use crate::TrafficConfig;

    #[test]
    fn defaults_validate() {
        assert!(TrafficConfig::default().validate().is_ok());
    }

    #[test]
    fn yellow_longer_than_cycle_rejected() {
        let cfg = TrafficConfig {
            yellow_secs: 12.0,
            ..TrafficConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_spawn_interval_rejected() {
        let cfg = TrafficConfig {
            spawn_interval_secs: 0.0,
            ..TrafficConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
