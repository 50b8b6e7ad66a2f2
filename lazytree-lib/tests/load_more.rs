//! Load-more pagination through the tree controller.

use std::sync::Arc;
use std::time::Duration;

use lazytree_lib::Error;
use lazytree_lib::TreeController;
use lazytree_lib::config::MockSourceConfig;
use lazytree_lib::error::FetchError;
use lazytree_lib::error::TreeError;
use lazytree_lib::host::ChannelHost;
use lazytree_lib::host::NoopHost;
use lazytree_lib::host::TreeEvent;
use lazytree_lib::model::NodeId;
use lazytree_lib::model::NodeRef;
use lazytree_lib::model::ParentKey;
use lazytree_lib::model::RegularNode;
use lazytree_lib::model::SentinelStatus;
use lazytree_lib::model::TreeModel;
use lazytree_lib::model::TreeNode;
use lazytree_lib::pagination::LoadState;
use lazytree_lib::source::MockSource;

fn load_more_roots() -> TreeModel {
    TreeModel::with_roots(
        (0..10)
            .map(|i| RegularNode::lazy(i.to_string(), format!("loadMoreRoot{i}")).into())
            .collect(),
    )
}

fn setup(config: MockSourceConfig) -> (TreeController, Arc<MockSource>) {
    let source = Arc::new(MockSource::new(config));
    let controller = TreeController::new(load_more_roots(), source.clone(), Arc::new(NoopHost));
    (controller, source)
}

async fn children(controller: &TreeController, parent: &ParentKey) -> Vec<TreeNode> {
    controller
        .snapshot()
        .await
        .children(parent)
        .map(<[TreeNode]>::to_vec)
        .unwrap_or_default()
}

fn assert_sentinel_last(nodes: &[TreeNode]) {
    let sentinels = nodes.iter().filter(|n| n.is_sentinel()).count();
    assert!(sentinels <= 1, "more than one load-more entry");
    if sentinels == 1 {
        assert!(nodes.last().is_some_and(TreeNode::is_sentinel), "load-more entry not last");
    }
}

// =============================================================================
// Paging through a large parent
// =============================================================================

#[tokio::test]
async fn test_thousand_children_in_pages_of_hundred() {
    let (controller, source) = setup(MockSourceConfig::instant());
    let parent = ParentKey::node("0");

    controller.expand(&NodeId::new("0")).await.unwrap();

    let nodes = children(&controller, &parent).await;
    assert_eq!(nodes.len(), 101);
    assert_eq!(nodes[100].label(), "Load more (900 remaining)");
    assert_eq!(controller.skip(&parent).await, 100);
    assert_eq!(controller.load_state(&parent).await, LoadState::PartiallyLoaded);

    controller
        .on_activate(NodeRef::Sentinel(parent.clone()))
        .await
        .unwrap();

    let nodes = children(&controller, &parent).await;
    assert_eq!(nodes.len(), 201);
    assert_eq!(nodes[100].label(), "node-0-100");
    assert_eq!(nodes[199].label(), "node-0-199");
    assert_eq!(nodes[200].label(), "Load more (800 remaining)");
    assert_eq!(controller.skip(&parent).await, 200);

    for _ in 0..8 {
        controller
            .on_activate(NodeRef::Sentinel(parent.clone()))
            .await
            .unwrap();
        assert_sentinel_last(&children(&controller, &parent).await);
    }

    let nodes = children(&controller, &parent).await;
    assert_eq!(source.calls(), 10);
    assert_eq!(controller.skip(&parent).await, 1000);
    assert_eq!(nodes.len(), 1000);
    assert!(nodes.iter().all(|n| !n.is_sentinel()));
    assert_eq!(controller.load_state(&parent).await, LoadState::FullyLoaded);

    // Pages were appended in order.
    let expected: Vec<String> = (0..1000).map(|i| format!("node-0-{i}")).collect();
    let labels: Vec<String> = nodes.iter().map(TreeNode::label).collect();
    assert_eq!(labels, expected);
}

#[tokio::test]
async fn test_skip_grows_by_page_size() {
    let (controller, _) = setup(MockSourceConfig::instant().with_total(10_000));
    let parent = ParentKey::node("3");

    controller.expand(&NodeId::new("3")).await.unwrap();
    for n in 2..=6 {
        controller.load_more(&parent).await.unwrap();
        assert_eq!(controller.skip(&parent).await, n * 100);
    }
}

#[tokio::test]
async fn test_single_page_parent_is_fully_loaded() {
    let (controller, _) = setup(MockSourceConfig::instant().with_total(100));
    let parent = ParentKey::node("1");

    controller.expand(&NodeId::new("1")).await.unwrap();

    let nodes = children(&controller, &parent).await;
    assert_eq!(nodes.len(), 100);
    assert!(nodes.iter().all(|n| !n.is_sentinel()));
    assert_eq!(controller.load_state(&parent).await, LoadState::FullyLoaded);
}

#[tokio::test]
async fn test_other_parents_untouched() {
    let (controller, _) = setup(MockSourceConfig::instant());

    controller.expand(&NodeId::new("0")).await.unwrap();
    controller.load_more(&ParentKey::node("0")).await.unwrap();

    let model = controller.snapshot().await;
    assert_eq!(model.roots().len(), 10);
    assert!(!model.find(&NodeId::new("1")).unwrap().is_loaded());
    assert_eq!(controller.skip(&ParentKey::node("1")).await, 0);
}

// =============================================================================
// Top-level pagination
// =============================================================================

#[tokio::test]
async fn test_root_pages_append_to_top_level() {
    let source = Arc::new(MockSource::new(MockSourceConfig::instant().with_total(250)));
    let controller = TreeController::new(TreeModel::new(), source.clone(), Arc::new(NoopHost));

    controller.load_root().await.unwrap();
    let model = controller.snapshot().await;
    assert_eq!(model.roots().len(), 101);
    assert_eq!(model.roots()[100].label(), "Load more (150 remaining)");

    controller
        .on_activate(NodeRef::Sentinel(ParentKey::Root))
        .await
        .unwrap();
    let model = controller.snapshot().await;
    assert_eq!(model.roots().len(), 201);
    assert_eq!(model.roots()[150].label(), "node-root-150");
    assert!(model.roots()[..200].iter().all(|n| n.as_regular().is_some_and(|r| !r.is_loaded())));

    controller.load_more(&ParentKey::Root).await.unwrap();
    let model = controller.snapshot().await;
    assert_eq!(model.roots().len(), 250);
    assert!(model.sentinel(&ParentKey::Root).is_none());

    controller.load_root().await.unwrap();
    assert_eq!(source.calls(), 3);
    assert_eq!(controller.snapshot().await.roots().len(), 250);
}

// =============================================================================
// Failures and retry
// =============================================================================

#[tokio::test]
async fn test_failed_page_is_retryable() {
    let (controller, source) = setup(MockSourceConfig::instant());
    let parent = ParentKey::node("0");
    controller.expand(&NodeId::new("0")).await.unwrap();

    source.fail_next(1);
    let err = controller
        .on_activate(NodeRef::Sentinel(parent.clone()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Fetch(FetchError::Network(_))));
    assert_eq!(controller.skip(&parent).await, 100);
    assert_eq!(controller.load_state(&parent).await, LoadState::Failed);
    let nodes = children(&controller, &parent).await;
    assert_eq!(nodes.len(), 101);
    let sentinel = nodes[100].as_sentinel().unwrap();
    assert!(matches!(sentinel.status, SentinelStatus::Failed(_)));
    assert!(sentinel.label().ends_with("(activate to retry)"));

    controller
        .on_activate(NodeRef::Sentinel(parent.clone()))
        .await
        .unwrap();

    let nodes = children(&controller, &parent).await;
    assert_eq!(nodes.len(), 201);
    assert_eq!(nodes[100].label(), "node-0-100");
    assert_eq!(nodes[200].label(), "Load more (800 remaining)");
    assert_eq!(controller.skip(&parent).await, 200);
}

#[tokio::test]
async fn test_failed_first_page_can_be_expanded_again() {
    let (controller, source) = setup(MockSourceConfig::instant());
    let id = NodeId::new("2");
    source.fail_next(1);

    let err = controller.expand(&id).await.unwrap_err();
    assert!(err.is_retryable());
    assert!(!controller.snapshot().await.find(&id).unwrap().is_loaded());

    controller.expand(&id).await.unwrap();
    assert_eq!(controller.skip(&ParentKey::Node(id)).await, 100);
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_duplicate_activation_fetches_once() {
    let (controller, source) = setup(MockSourceConfig::default());
    let parent = ParentKey::node("0");
    controller.expand(&NodeId::new("0")).await.unwrap();

    let sentinel = NodeRef::Sentinel(parent.clone());
    let (first, second) = tokio::join!(
        controller.on_activate(sentinel.clone()),
        controller.on_activate(sentinel.clone()),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(Error::Tree(TreeError::AlreadyLoading(p))) if *p == parent
    )));
    assert_eq!(source.calls(), 2);
    assert_eq!(children(&controller, &parent).await.len(), 201);
}

#[tokio::test(start_paused = true)]
async fn test_loading_label_while_fetching() {
    let (controller, _) = setup(MockSourceConfig::default());
    let parent = ParentKey::node("0");
    controller.expand(&NodeId::new("0")).await.unwrap();

    let probe = async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let model = controller.snapshot().await;
        let label = model.sentinel(&parent).map(|s| s.label());
        (label, controller.is_loading(&parent))
    };
    let (result, (label, loading)) =
        tokio::join!(controller.on_activate(NodeRef::Sentinel(parent.clone())), probe);

    result.unwrap();
    assert_eq!(label.as_deref(), Some("Loading more nodes"));
    assert!(loading);
    assert!(!controller.is_loading(&parent));
}

// =============================================================================
// Host notifications
// =============================================================================

#[tokio::test]
async fn test_host_sees_refresh_and_deactivation() {
    let source = Arc::new(MockSource::new(MockSourceConfig::instant()));
    let (host, mut events) = ChannelHost::new();
    let controller = TreeController::new(load_more_roots(), source, Arc::new(host));
    let parent = ParentKey::node("0");

    controller.expand(&NodeId::new("0")).await.unwrap();
    assert_eq!(events.try_recv().ok(), Some(TreeEvent::ModelChanged));
    assert!(events.try_recv().is_err());

    let sentinel = NodeRef::Sentinel(parent);
    controller.on_activate(sentinel.clone()).await.unwrap();

    let received: Vec<TreeEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert_eq!(
        received,
        [
            TreeEvent::ModelChanged,
            TreeEvent::ModelChanged,
            TreeEvent::Deactivated(sentinel),
        ]
    );
    assert_eq!(controller.active().await, None);
}

#[tokio::test]
async fn test_fetch_children_installs_page() {
    let (controller, _) = setup(MockSourceConfig::instant().with_total(150));
    let parent = ParentKey::node("4");

    let nodes = controller.fetch_children(&parent).await.unwrap();

    assert_eq!(nodes.len(), 101);
    assert_eq!(nodes[100].label(), "Load more (50 remaining)");
    assert_eq!(controller.skip(&parent).await, 100);
    assert_eq!(children(&controller, &parent).await, nodes);
}

// =============================================================================
// Lazy-load hook
// =============================================================================

#[tokio::test]
async fn test_expand_after_fetch_children_keeps_first_page() {
    let (controller, source) = setup(MockSourceConfig::instant());
    let parent = ParentKey::node("0");

    controller.fetch_children(&parent).await.unwrap();
    controller.expand(&NodeId::new("0")).await.unwrap();

    let nodes = children(&controller, &parent).await;
    assert_eq!(source.calls(), 1);
    assert_eq!(nodes.len(), 101);
    assert_eq!(nodes[0].label(), "node-0-0");
    assert_eq!(nodes[99].label(), "node-0-99");
    assert_eq!(controller.skip(&parent).await, 100);
    let model = controller.snapshot().await;
    assert_eq!(model.find(&NodeId::new("0")).unwrap().loaded_count(), 100);
}

#[tokio::test]
async fn test_fetch_children_pages_forward() {
    let (controller, _) = setup(MockSourceConfig::instant().with_total(150));
    let parent = ParentKey::node("4");

    controller.fetch_children(&parent).await.unwrap();
    let second = controller.fetch_children(&parent).await.unwrap();
    let third = controller.fetch_children(&parent).await.unwrap();

    assert_eq!(second.len(), 50);
    assert_eq!(second[0].label(), "node-4-100");
    assert!(third.is_empty());
    let nodes = children(&controller, &parent).await;
    assert_eq!(nodes.len(), 150);
    assert_sentinel_last(&nodes);
    assert_eq!(controller.skip(&parent).await, 150);
}

#[tokio::test]
async fn test_fetch_children_of_unknown_node() {
    let (controller, source) = setup(MockSourceConfig::instant());
    let parent = ParentKey::node("nope");

    let err = controller.fetch_children(&parent).await.unwrap_err();

    assert_eq!(err, Error::Tree(TreeError::NodeNotFound(NodeId::new("nope"))));
    assert_eq!(source.calls(), 0);
    assert_eq!(controller.skip(&parent).await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_fetch_children_is_rejected() {
    let (controller, source) = setup(MockSourceConfig::default());
    let parent = ParentKey::node("5");

    let (first, second) = tokio::join!(
        controller.fetch_children(&parent),
        controller.fetch_children(&parent),
    );

    assert_eq!(first.map(|nodes| nodes.len()), Ok(101));
    assert_eq!(second, Err(Error::Tree(TreeError::AlreadyLoading(parent.clone()))));
    assert_eq!(source.calls(), 1);
    assert_eq!(controller.skip(&parent).await, 100);
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_dropped_load_more_restores_sentinel() {
    let (controller, _) = setup(MockSourceConfig::default());
    let parent = ParentKey::node("0");
    controller.expand(&NodeId::new("0")).await.unwrap();

    let cancelled = tokio::time::timeout(Duration::from_secs(1), controller.load_more(&parent)).await;

    assert!(cancelled.is_err());
    assert!(!controller.is_loading(&parent));
    assert_eq!(controller.load_state(&parent).await, LoadState::PartiallyLoaded);
    assert_eq!(controller.skip(&parent).await, 100);
    let model = controller.snapshot().await;
    assert_eq!(
        model.sentinel(&parent).map(|s| s.label()).as_deref(),
        Some("Load more (900 remaining)")
    );

    controller.load_more(&parent).await.unwrap();
    assert_eq!(controller.skip(&parent).await, 200);
    assert_eq!(children(&controller, &parent).await.len(), 201);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_first_load_can_be_expanded_again() {
    let (controller, source) = setup(MockSourceConfig::default());
    let id = NodeId::new("6");
    let parent = ParentKey::Node(id.clone());

    let cancelled = tokio::time::timeout(Duration::from_secs(1), controller.expand(&id)).await;

    assert!(cancelled.is_err());
    assert_eq!(controller.load_state(&parent).await, LoadState::NotLoaded);
    controller.expand(&id).await.unwrap();
    assert_eq!(source.calls(), 2);
    assert_eq!(children(&controller, &parent).await.len(), 101);
}
