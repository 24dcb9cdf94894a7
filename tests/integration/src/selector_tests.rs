//! Selector facade and change-watch integration tests.

use std::sync::Arc;
use std::time::Duration;

use endpoint_select::prelude::*;

fn sample_registry() -> Arc<EndpointRegistry> {
    let registry = Arc::new(EndpointRegistry::new());
    registry.publish(vec![
        Endpoint::builder("Home/Index")
            .require("controller", "Home")
            .require("action", "Index")
            .build(),
        Endpoint::builder("Page:/About")
            .require("controller", "Page")
            .require("page", "/About")
            .build(),
        Endpoint::builder("Page:/Contact")
            .require("controller", "Page")
            .require("page", "/Contact")
            .build(),
    ]);
    registry
}

#[test]
fn selector_end_to_end() {
    let selector = EndpointSelector::new(sample_registry());

    let matches = selector
        .select_endpoints(
            &RouteValues::new().with("controller", "Page").with("page", "/About"),
        )
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name(), "Page:/About");

    let matches = selector
        .select_endpoints(
            &RouteValues::new().with("controller", "Page").with("page", "/Missing"),
        )
        .unwrap();
    assert!(matches.is_empty());
}

#[test]
fn selector_follows_republished_registry() {
    let registry = sample_registry();
    let selector = EndpointSelector::new(Arc::clone(&registry));
    let about = RouteValues::new().with("controller", "Page").with("page", "/About");

    assert_eq!(selector.select_endpoints(&about).unwrap().len(), 1);

    // Convention re-evaluation drops the About page.
    registry.publish(vec![
        Endpoint::builder("Page:/Contact")
            .require("controller", "Page")
            .require("page", "/Contact")
            .build(),
    ]);

    assert!(selector.select_endpoints(&about).unwrap().is_empty());
    let contact = RouteValues::new().with("controller", "Page").with("page", "/Contact");
    assert_eq!(selector.select_endpoints(&contact).unwrap().len(), 1);
}

#[test]
fn selector_can_be_shared_across_threads() {
    let selector = Arc::new(EndpointSelector::new(sample_registry()));
    let mut handles = vec![];

    for _ in 0..8 {
        let selector = Arc::clone(&selector);
        handles.push(std::thread::spawn(move || {
            for _ in 0..200 {
                let matches = selector
                    .select_endpoints(
                        &RouteValues::new().with("controller", "Home").with("action", "Index"),
                    )
                    .unwrap();
                assert_eq!(matches.len(), 1);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("Thread panicked");
    }
}

#[test]
fn selector_usable_from_async_context() {
    // No await points inside; a ready future wrapping the call is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let selector = EndpointSelector::new(sample_registry());

    let matches = runtime.block_on(async {
        selector.select_endpoints(
            &RouteValues::new().with("controller", "Home").with("action", "Index"),
        )
    });
    assert_eq!(matches.unwrap().len(), 1);
}

#[tokio::test]
async fn watch_signals_selector_refresh() {
    let registry = sample_registry();
    let selector = EndpointSelector::new(Arc::clone(&registry));
    let mut watch = registry.subscribe();

    // Warm the cache at the current generation.
    selector.select_endpoints(&RouteValues::new()).unwrap();
    let warmed = selector.cache().cached_generation().unwrap();

    let generation = registry.publish(vec![
        Endpoint::builder("Blog").require("controller", "Blog").build(),
    ]);

    // The change notification carries the new generation...
    let notified = tokio::time::timeout(Duration::from_secs(1), watch.changed())
        .await
        .expect("notification should arrive")
        .unwrap();
    assert_eq!(notified, generation);
    assert_ne!(notified, warmed);

    // ...and an eager refresh on that signal observes the new endpoint set.
    let matches = selector
        .select_endpoints(&RouteValues::new().with("controller", "Blog"))
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(selector.cache().cached_generation(), Some(generation));
}

#[test]
fn selector_dispose_is_terminal() {
    let registry = sample_registry();
    let selector = EndpointSelector::new(Arc::clone(&registry));
    selector.select_endpoints(&RouteValues::new()).unwrap();

    selector.dispose();

    let err = selector.select_endpoints(&RouteValues::new()).unwrap_err();
    assert!(matches!(err, SelectError::Disposed));
    assert_eq!(registry.subscriber_count(), 0);
}
