use crate::gui_bridge::model::CoverageView;
use crate::workflow::runner::Runner;
use anyhow::{anyhow, Result};
use log::{error, info};
use radarcov::interface::SweepRequest;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

pub fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct SweepRejected;

impl warp::reject::Reject for SweepRejected {}

type SharedView = Arc<RwLock<CoverageView>>;

fn view_reply(state: &SharedView) -> warp::reply::WithStatus<warp::reply::Json> {
    match state.read() {
        Ok(view) => warp::reply::with_status(warp::reply::json(&*view), StatusCode::OK),
        Err(_) => warp::reply::with_status(
            warp::reply::json(&json!({"status": "unavailable"})),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    }
}

fn routes(
    state: SharedView,
    runner: Arc<Runner>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());
    let runner_filter = warp::any().map(move || runner.clone());

    let get_route = warp::path("coverage")
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: SharedView| view_reply(&state));

    let sweep_route = warp::path("sweep")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter)
        .and(runner_filter)
        .and_then(
            |request: SweepRequest, state: SharedView, runner: Arc<Runner>| async move {
                match runner.run_sweep(&request) {
                    Ok(samples) => {
                        let points = samples.len();
                        let view = CoverageView::new(request.label.clone(), samples);
                        let valid = view.stats.valid;
                        if let Ok(mut guard) = state.write() {
                            *guard = view;
                        }
                        Ok::<_, warp::Rejection>(warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "ok",
                                "points": points,
                                "valid": valid,
                            })),
                            StatusCode::OK,
                        ))
                    }
                    Err(err) => {
                        error!("sweep request failed: {:#}", err);
                        Err(warp::reject::custom(SweepRejected))
                    }
                }
            },
        );

    get_route.or(sweep_route)
}

/// Hosts the coverage HTTP endpoint on a background thread.
pub struct CoverageBridge {
    state: SharedView,
}

impl CoverageBridge {
    pub fn new(runner: Arc<Runner>, address: SocketAddr) -> Self {
        let state: SharedView = Arc::new(RwLock::new(CoverageView::default()));
        let filter = routes(state.clone(), runner);

        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                info!("coverage bridge listening on {}", address);
                warp::serve(filter).run(address).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, view: CoverageView) -> Result<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| anyhow!("coverage view lock poisoned"))?;
        println!(
            "[BRIDGE] coverage points: {}, valid: {}",
            view.samples.len(),
            view.stats.valid
        );
        *guard = view;
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[BRIDGE] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> CoverageView {
        self.state
            .read()
            .map(|view| view.clone())
            .unwrap_or_default()
    }
}
