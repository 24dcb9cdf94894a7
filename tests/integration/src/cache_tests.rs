//! Dependent cache integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use endpoint_select::prelude::*;

fn publish_controllers(registry: &EndpointRegistry, names: &[&str]) -> Generation {
    registry.publish(
        names
            .iter()
            .map(|name| Endpoint::builder(*name).require("controller", *name).build())
            .collect::<Vec<_>>(),
    )
}

#[test]
fn ensure_current_is_idempotent_per_generation() {
    let registry = Arc::new(EndpointRegistry::new());
    publish_controllers(&registry, &["Home"]);
    let cache = DependentCache::new(Arc::clone(&registry));

    let tables: Vec<_> = (0..5).map(|_| cache.ensure_current().unwrap()).collect();
    for table in &tables[1..] {
        assert!(Arc::ptr_eq(&tables[0], table));
    }

    // One distinct generation observed, one rebuild.
    assert_eq!(cache.stats().rebuilds(), 1);
}

#[test]
fn generation_change_is_observed_by_next_access() {
    let registry = Arc::new(EndpointRegistry::new());
    publish_controllers(&registry, &["A"]);
    let cache = DependentCache::new(Arc::clone(&registry));

    let t1 = cache.ensure_current().unwrap();
    assert_eq!(
        t1.select(&RouteValues::new().with("controller", "A")).len(),
        1
    );

    // Registry advances: A removed, D added.
    let g2 = publish_controllers(&registry, &["D"]);

    let t2 = cache.ensure_current().unwrap();
    assert_eq!(cache.cached_generation(), Some(g2));
    assert!(t2.select(&RouteValues::new().with("controller", "A")).is_empty());
    assert_eq!(
        t2.select(&RouteValues::new().with("controller", "D")).len(),
        1
    );
}

#[test]
fn generations_never_regress_across_sequential_accesses() {
    let registry = Arc::new(EndpointRegistry::new());
    let cache = DependentCache::new(Arc::clone(&registry));

    let mut last = None;
    for round in 0..10 {
        let name = format!("C{round}");
        publish_controllers(&registry, &[name.as_str()]);
        cache.ensure_current().unwrap();
        let observed = cache.cached_generation().unwrap();
        if let Some(previous) = last {
            assert!(observed.as_u64() >= previous);
        }
        last = Some(observed.as_u64());
    }
}

#[test]
fn concurrent_readers_during_one_transition_rebuild_once() {
    let registry = Arc::new(EndpointRegistry::new());
    publish_controllers(&registry, &["Old"]);
    let cache = Arc::new(DependentCache::new(Arc::clone(&registry)));
    cache.ensure_current().unwrap();
    assert_eq!(cache.stats().rebuilds(), 1);

    publish_controllers(&registry, &["New"]);

    let num_threads = 12;
    let barrier = Arc::new(Barrier::new(num_threads));
    let old_seen = Arc::new(AtomicUsize::new(0));
    let new_seen = Arc::new(AtomicUsize::new(0));
    let mut handles = vec![];

    for _ in 0..num_threads {
        let cache = Arc::clone(&cache);
        let barrier = Arc::clone(&barrier);
        let old_seen = Arc::clone(&old_seen);
        let new_seen = Arc::clone(&new_seen);
        handles.push(thread::spawn(move || {
            barrier.wait();
            let table = cache.ensure_current().unwrap();

            // Every reader sees one complete table or the other.
            let old = table.select(&RouteValues::new().with("controller", "Old"));
            let new = table.select(&RouteValues::new().with("controller", "New"));
            match (old.len(), new.len()) {
                (1, 0) => old_seen.fetch_add(1, Ordering::Relaxed),
                (0, 1) => new_seen.fetch_add(1, Ordering::Relaxed),
                other => panic!("partially built table observed: {other:?}"),
            };
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(
        old_seen.load(Ordering::Relaxed) + new_seen.load(Ordering::Relaxed),
        num_threads
    );
    // Exactly one rebuild for the transition.
    assert_eq!(cache.stats().rebuilds(), 2);
}

#[test]
fn strict_mode_never_serves_stale_after_publish() {
    let registry = Arc::new(EndpointRegistry::new());
    publish_controllers(&registry, &["Old"]);
    let cache = Arc::new(DependentCache::with_mode(
        Arc::clone(&registry),
        ConsistencyMode::Strict,
    ));
    cache.ensure_current().unwrap();

    for round in 0..20 {
        let name = format!("C{round}");
        let generation = publish_controllers(&registry, &[name.as_str()]);
        cache.ensure_current().unwrap();
        assert_eq!(cache.cached_generation(), Some(generation));
    }
}

#[test]
fn failed_rebuild_is_isolated_to_the_trigger() {
    let registry = Arc::new(EndpointRegistry::new());
    publish_controllers(&registry, &["Good"]);
    let cache = Arc::new(DependentCache::new(Arc::clone(&registry)));
    let good = cache.ensure_current().unwrap();

    registry.publish(vec![
        Endpoint::builder("bad")
            .require("x", 1)
            .require("X", 2)
            .build(),
    ]);

    // The triggering caller fails...
    assert!(cache.ensure_current().is_err());
    assert_eq!(cache.stats().rebuild_failures(), 1);

    // ...while the previously captured table is untouched.
    assert_eq!(
        good.select(&RouteValues::new().with("controller", "Good")).len(),
        1
    );

    // A later good publish recovers without recreating the cache.
    publish_controllers(&registry, &["Recovered"]);
    let table = cache.ensure_current().unwrap();
    assert_eq!(
        table
            .select(&RouteValues::new().with("controller", "Recovered"))
            .len(),
        1
    );
}

#[test]
fn dispose_stops_rebuilds_and_fails_deterministically() {
    let registry = Arc::new(EndpointRegistry::new());
    publish_controllers(&registry, &["Home"]);
    let cache = DependentCache::new(Arc::clone(&registry));
    cache.ensure_current().unwrap();

    cache.dispose();
    cache.dispose();

    publish_controllers(&registry, &["Changed"]);
    for _ in 0..3 {
        assert!(matches!(
            cache.ensure_current().unwrap_err(),
            SelectError::Disposed
        ));
    }
    assert_eq!(cache.stats().rebuilds(), 1);
    assert_eq!(registry.subscriber_count(), 0);
}

#[test]
fn dispose_races_with_readers_safely() {
    let registry = Arc::new(EndpointRegistry::new());
    publish_controllers(&registry, &["Home"]);
    let cache = Arc::new(DependentCache::new(Arc::clone(&registry)));
    cache.ensure_current().unwrap();

    let barrier = Arc::new(Barrier::new(9));
    let mut handles = vec![];

    for _ in 0..8 {
        let cache = Arc::clone(&cache);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..100 {
                match cache.ensure_current() {
                    Ok(table) => assert_eq!(table.endpoint_count(), 1),
                    Err(err) => assert!(matches!(err, SelectError::Disposed)),
                }
            }
        }));
    }

    {
        let cache = Arc::clone(&cache);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            cache.dispose();
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    assert!(cache.is_disposed());
}
