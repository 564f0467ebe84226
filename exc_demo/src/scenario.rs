//! Three-stage nested pipeline exercising the scope contract.
//!
//! Stage 1 binds a scratch buffer, stage 2 creates a spool file in the
//! workdir, stage 3 opens the input stream. Each stage is one scope with
//! its own handlers and finalizer, nested through `?` so an unhandled code
//! climbs stage by stage to the pipeline boundary. Fault switches inject
//! failures deterministically at each stage.

use exc::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Demo application configuration.
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "exc-demo-01"
///
/// [pipeline]
/// workdir = "/tmp"
/// buffer_len = 262144
///
/// [faults]
/// fail_alloc = false
/// ```
#[derive(Debug, Deserialize)]
pub struct DemoConfig {
    /// Base configuration (log level, service name).
    pub shared: SharedConfig,
    /// Pipeline stage parameters.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Deterministic fault injection.
    #[serde(default)]
    pub faults: FaultConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            shared: SharedConfig {
                log_level: LogLevel::default(),
                service_name: "exc-demo".to_string(),
            },
            pipeline: PipelineConfig::default(),
            faults: FaultConfig::default(),
        }
    }
}

/// Stage parameters for the demo pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory for the spool file.
    pub workdir: PathBuf,
    /// Scratch buffer size in bytes.
    pub buffer_len: usize,
    /// Input stream path (stage 3). Missing input is recovered, not fatal.
    pub stream_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workdir: std::env::temp_dir(),
            buffer_len: 256 * 1024,
            stream_path: PathBuf::from("exc-demo-input.txt"),
        }
    }
}

/// Fault switches, one per stage.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct FaultConfig {
    /// Fail the buffer binding (stage 1) with ENOMEM.
    pub fail_alloc: bool,
    /// Fail the spool-file binding (stage 2) with EACCES.
    pub fail_spool: bool,
    /// Raise ECANCELED from the middle of stage 2's body.
    pub throw_midway: bool,
}

/// Resource slots for the whole pipeline. Each stage's finalizer releases
/// exactly the slots its binding step filled.
#[derive(Default)]
struct PipelineState {
    buffer: Option<Vec<u8>>,
    spool: Option<File>,
    stream: Option<File>,
}

/// Run the nested pipeline and report its propagated outcome.
pub fn run_pipeline(cfg: &DemoConfig) -> Outcome {
    let faults = cfg.faults;
    let mut st = PipelineState::default();

    Scope::named("buffer", &mut st)
        .bind(|st| {
            ensure_or(!faults.fail_alloc, ErrorCode::ENOMEM)?;
            st.buffer = Some(vec![0u8; cfg.pipeline.buffer_len]);
            info!(len = cfg.pipeline.buffer_len, "scratch buffer bound");
            Ok(Flow::Done)
        })
        .run(|st| {
            spool_stage(cfg, st)?;
            Ok(Flow::Done)
        })
        .catch_any(|_, code| {
            // Outermost clause: report and let the boundary see the code.
            warn!(code = code.name(), "pipeline failed: {code}");
            Err(code)
        })
        .finally(|st| {
            if st.buffer.take().is_some() {
                info!("scratch buffer released");
            }
        })
}

/// Stage 2: spool file in the workdir, wrapping stage 3.
fn spool_stage(cfg: &DemoConfig, st: &mut PipelineState) -> Outcome {
    let spool_path = cfg.pipeline.workdir.join("exc-demo.spool");
    let faults = cfg.faults;

    let outcome = Scope::named("spool", st)
        .bind(|st| {
            ensure_or(!faults.fail_spool, ErrorCode::EACCES)?;
            st.spool = Some(File::create(&spool_path).map_err(ErrorCode::from)?);
            info!(path = %spool_path.display(), "spool file bound");
            Ok(Flow::Done)
        })
        .run(|st| {
            if let Some(spool) = st.spool.as_mut() {
                writeln!(spool, "pipeline started").map_err(ErrorCode::from)?;
            }
            if faults.throw_midway {
                return Err(ErrorCode::ECANCELED);
            }
            stream_stage(cfg, st)?;
            Ok(Flow::Done)
        })
        .catch(ErrorCode::ECANCELED, |_, _| {
            warn!("pipeline canceled midway, spool kept for inspection");
            Ok(Flow::Done)
        })
        .finally(|st| {
            if st.spool.take().is_some() {
                info!("spool file closed");
            }
        });

    // The spool is scratch output; its on-disk remnant goes with the scope.
    if !faults.throw_midway {
        let _ = std::fs::remove_file(&spool_path);
    }
    outcome
}

/// Stage 3: input stream. A missing input is recovered locally.
fn stream_stage(cfg: &DemoConfig, st: &mut PipelineState) -> Outcome {
    Scope::named("stream", st)
        .bind(|st| {
            st.stream = Some(File::open(&cfg.pipeline.stream_path).map_err(ErrorCode::from)?);
            info!(path = %cfg.pipeline.stream_path.display(), "input stream bound");
            Ok(Flow::Done)
        })
        .catch(ErrorCode::ENOENT, |_, _| {
            warn!(
                path = %cfg.pipeline.stream_path.display(),
                "input stream missing, continuing without it"
            );
            Ok(Flow::Done)
        })
        .finally(|st| {
            if st.stream.take().is_some() {
                info!("input stream closed");
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_config(workdir: PathBuf) -> DemoConfig {
        DemoConfig {
            pipeline: PipelineConfig {
                workdir,
                buffer_len: 1024,
                stream_path: PathBuf::from("definitely-missing-input.txt"),
            },
            ..DemoConfig::default()
        }
    }

    #[test]
    fn clean_run_recovers_missing_stream() {
        let dir = tempdir().unwrap();
        let cfg = test_config(dir.path().to_path_buf());
        assert_eq!(run_pipeline(&cfg), Ok(()));
    }

    #[test]
    fn alloc_fault_propagates_enomem() {
        let dir = tempdir().unwrap();
        let mut cfg = test_config(dir.path().to_path_buf());
        cfg.faults.fail_alloc = true;
        assert_eq!(run_pipeline(&cfg), Err(ErrorCode::ENOMEM));
    }

    #[test]
    fn spool_fault_propagates_eacces() {
        let dir = tempdir().unwrap();
        let mut cfg = test_config(dir.path().to_path_buf());
        cfg.faults.fail_spool = true;
        assert_eq!(run_pipeline(&cfg), Err(ErrorCode::EACCES));
    }

    #[test]
    fn midway_cancel_is_recovered_in_stage_two() {
        let dir = tempdir().unwrap();
        let mut cfg = test_config(dir.path().to_path_buf());
        cfg.faults.throw_midway = true;
        assert_eq!(run_pipeline(&cfg), Ok(()));
        // The canceled run keeps its spool for inspection.
        assert!(dir.path().join("exc-demo.spool").exists());
    }

    #[test]
    fn present_stream_is_read_and_released() {
        let dir = tempdir().unwrap();
        let stream_path = dir.path().join("input.txt");
        std::fs::write(&stream_path, "hello").unwrap();

        let mut cfg = test_config(dir.path().to_path_buf());
        cfg.pipeline.stream_path = stream_path;
        assert_eq!(run_pipeline(&cfg), Ok(()));
    }
}
