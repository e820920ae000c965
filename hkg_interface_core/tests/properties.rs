use proptest::prelude::*;

use hkg_interface_core::*;

fn fingerprint_strategy() -> impl Strategy<Value = Fingerprint> {
    let ids = prop::sample::select(vec![593u32, 688, 1056, 1290, 905, 608, 809, 1157, 0x58b, 1151, 1296, 42]);
    prop::collection::vec((0u8..4, ids), 0..24).prop_map(|pairs| pairs.into_iter().collect::<Fingerprint>())
}

fn params_strategy() -> impl Strategy<Value = InterfaceParams> {
    prop::collection::vec(any::<bool>(), InterfaceParams::KEYS.len()).prop_map(|bits| {
        InterfaceParams::from_lookup(|key| {
            let idx = InterfaceParams::KEYS.iter().position(|k| *k == key).unwrap_or(0);
            bits[idx]
        })
    })
}

fn event_strategy() -> impl Strategy<Value = EventName> {
    prop::sample::select(vec![
        EventName::PedalPressed,
        EventName::WrongCarMode,
        EventName::PcmDisable,
        EventName::ParkBrake,
        EventName::ButtonEnable,
        EventName::BrakeUnavailable,
    ])
}

proptest! {
    #[test]
    fn resolution_is_deterministic(fp in fingerprint_strategy(), params in params_strategy()) {
        let table = StaticProfileTable::builtin().unwrap();
        let a = resolve_from_store(&fp, CarModel::Kona, &table, &params).unwrap();
        let b = resolve_from_store(&fp, CarModel::Kona, &table, &params).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn safety_list_always_single(fp in fingerprint_strategy(), params in params_strategy()) {
        let table = StaticProfileTable::builtin().unwrap();
        let p = resolve_from_store(&fp, CarModel::Kona, &table, &params).unwrap();
        prop_assert_eq!(p.safety_configs().len(), 1);
        prop_assert!((-1..=2).contains(&p.scc_bus));
        prop_assert_eq!(p.radar_off_can, p.scc_bus == -1);
    }

    #[test]
    fn event_set_never_duplicates(ops in prop::collection::vec((any::<bool>(), event_strategy()), 0..40)) {
        let mut set = EventSet::new();
        for (add, ev) in &ops {
            if *add { set.add(*ev) } else { set.remove(*ev) }
        }
        let fin = set.finalize();
        let mut seen = std::collections::HashSet::new();
        for ev in fin.as_slice() {
            prop_assert!(seen.insert(*ev));
        }
    }

    #[test]
    fn override_mode_always_clears_pedal(fp in fingerprint_strategy(), extra in prop::collection::vec(event_strategy(), 0..6)) {
        let params = InterfaceParams { mad_mode_enabled: true, ..Default::default() };
        let table = StaticProfileTable::builtin().unwrap();
        let profile = resolve_from_store(&fp, CarModel::Sonata, &table, &params).unwrap();
        let sig = CarSignals { v_ego: 20.0, can_valid: [true; 3], ..Default::default() };
        let t = translate(&sig, &profile, &params, &TranslatorCfg::default(), AlertState::default());

        let baseline = move |_: &VehicleState, _: bool| -> EventSet {
            let mut set: EventSet = extra.iter().copied().collect();
            set.add(EventName::PedalPressed);
            set
        };
        let view = CycleView { state: &t.state, alerts: t.alerts, profile: &profile, params: &params };
        let events = aggregate_events(view, &baseline, &InjectorChain::new());
        prop_assert!(!events.contains(EventName::PedalPressed));
    }
}
