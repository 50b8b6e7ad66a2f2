//! The three usage scenarios.

use std::sync::Arc;
use std::time::Duration;

use lazytree_lib::Error;
use lazytree_lib::TreeConfig;
use lazytree_lib::TreeController;
use lazytree_lib::config::MockSourceConfig;
use lazytree_lib::host::ChannelHost;
use lazytree_lib::host::TreeEvent;
use lazytree_lib::model::NodeId;
use lazytree_lib::model::NodeRef;
use lazytree_lib::model::ParentKey;
use lazytree_lib::model::RegularNode;
use lazytree_lib::model::TreeModel;
use lazytree_lib::pagination::LoadState;
use lazytree_lib::source::MockSource;
use lazytree_lib::source::TemplateSource;
use log::debug;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::render::print_tree;

/// Options for the load-more scenario.
#[derive(clap::Args, Debug)]
pub struct LoadMoreArgs {
    /// Id of the top-level node to page through (`0` to `9`)
    #[arg(long, default_value = "0")]
    expand: String,

    /// Number of load-more activations after the first page
    #[arg(long, default_value_t = 3)]
    clicks: usize,

    /// Page through the top level instead of a node's children
    #[arg(long)]
    root: bool,

    /// Simulated latency per page, in milliseconds
    #[arg(long, default_value_t = 3000)]
    latency_ms: u64,

    /// Children each parent has
    #[arg(long, default_value_t = 1000)]
    total: usize,

    /// Children requested per page
    #[arg(long, default_value_t = 100)]
    page_size: usize,

    /// Give up on a page after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Make this many fetches fail before succeeding
    #[arg(long, default_value_t = 0)]
    fail_first: usize,
}

/// Logs and counts pending host events.
fn drain(events: &mut UnboundedReceiver<TreeEvent>) -> usize {
    let mut count = 0;
    while let Ok(event) = events.try_recv() {
        debug!("host event: {event:?}");
        count += 1;
    }
    count
}

pub async fn sync(max_rows: usize) -> Result<(), Error> {
    let model = TreeModel::with_roots(vec![
        RegularNode::with_children(
            "root1",
            "root1",
            vec![
                RegularNode::leaf("child1", "child1").into(),
                RegularNode::leaf("child2", "child2").into(),
            ],
        )
        .into(),
        RegularNode::with_children(
            "root2",
            "root2",
            vec![
                RegularNode::leaf("child2.1", "child2.1").into(),
                RegularNode::with_children(
                    "child2.2",
                    "child2.2",
                    vec![RegularNode::leaf("subsub", "subsub").into()],
                )
                .into(),
            ],
        )
        .into(),
    ]);
    let (host, mut events) = ChannelHost::new();
    let source = TemplateSource::new(Vec::new());
    let controller = TreeController::new(model, Arc::new(source), Arc::new(host));

    for id in ["root1", "root2", "child2.2"] {
        controller.expand(&NodeId::new(id)).await?;
    }
    drain(&mut events);

    print_tree(&controller.snapshot().await, max_rows);
    Ok(())
}

pub async fn async_children(latency_ms: u64, max_rows: usize) -> Result<(), Error> {
    let model = TreeModel::with_roots(vec![
        RegularNode::with_children("root1", "root1", vec![RegularNode::leaf("child1", "child1").into()])
            .into(),
        RegularNode::lazy("root2", "root2").into(),
        RegularNode::leaf("root3", "root3").into(),
    ]);
    let (host, mut events) = ChannelHost::new();
    let source = TemplateSource::demo().with_latency(Duration::from_millis(latency_ms));
    let controller = TreeController::new(model, Arc::new(source), Arc::new(host));

    print_tree(&controller.snapshot().await, max_rows);
    for id in ["root2", "root2/child1"] {
        println!("\nexpanding {id}...");
        controller.expand(&NodeId::new(id)).await?;
        drain(&mut events);
        print_tree(&controller.snapshot().await, max_rows);
    }
    Ok(())
}

pub async fn load_more(args: &LoadMoreArgs, max_rows: usize) -> Result<(), Error> {
    let source = MockSource::new(
        MockSourceConfig::new()
            .with_latency(Duration::from_millis(args.latency_ms))
            .with_total(args.total),
    );
    source.fail_next(args.fail_first);

    let mut config = TreeConfig::default().with_page_size(args.page_size);
    if let Some(ms) = args.timeout_ms {
        config = config.with_fetch_timeout(Duration::from_millis(ms));
    }

    let (model, parent) = if args.root {
        (TreeModel::new(), ParentKey::Root)
    } else {
        let roots = (0..10)
            .map(|i| RegularNode::lazy(i.to_string(), format!("loadMoreRoot{i}")).into())
            .collect();
        (TreeModel::with_roots(roots), ParentKey::node(args.expand.as_str()))
    };

    let (host, mut events) = ChannelHost::new();
    let controller =
        TreeController::new(model, Arc::new(source), Arc::new(host)).with_config(config);

    for step in 0..=args.clicks {
        let has_sentinel = controller.snapshot().await.sentinel(&parent).is_some();
        let result = match controller.load_state(&parent).await {
            LoadState::FullyLoaded => {
                println!("all children of {parent} loaded");
                break;
            }
            _ if has_sentinel => {
                println!("activating load-more entry of {parent}...");
                controller.on_activate(NodeRef::Sentinel(parent.clone())).await
            }
            _ => {
                println!("loading first page of {parent}...");
                match &parent {
                    ParentKey::Root => controller.load_root().await,
                    ParentKey::Node(id) => controller.expand(id).await,
                }
            }
        };
        let refreshes = drain(&mut events);

        match result {
            Ok(()) => {}
            Err(err) if err.is_retryable() => println!("  {err}; retrying on next step"),
            Err(err) => return Err(err),
        }

        let skip = controller.skip(&parent).await;
        let state = controller.load_state(&parent).await;
        println!(
            "  step {step}: {skip} of {} loaded ({state}), {refreshes} refreshes",
            args.total
        );
        if let Some(sentinel) = controller.snapshot().await.sentinel(&parent) {
            println!("  last entry: {}", sentinel.label());
        }
    }

    println!();
    print_tree(&controller.snapshot().await, max_rows);
    Ok(())
}
