//! Running an external image-processing engine over an [`ImageList`].
//!
//! The engine itself is a collaborator behind the [`Engine`] trait. This
//! module prepares its resources, hands it the image and label sequences,
//! and turns whatever comes back (errors and panics alike) into a
//! [`Status`] plus, for engine failures, a bounded [`ErrorInfo`].

mod resources;

pub use resources::{ResourcePaths, UPDATE_SIGNATURE, has_update_signature};

use std::any::Any;
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use enough::{Stop, Unstoppable};

use crate::error::{EngineFault, PlanarError};
use crate::image::PlanarImage;
use crate::list::ImageList;
use crate::record::ErrorInfo;
use crate::signal::{AbortFlag, Progress};
use crate::status::Status;

/// Host name exported to the engine when [`RunOptions::host_name`] is unset.
pub const DEFAULT_HOST_NAME: &str = "zenplanar";

/// Engine variable that receives the host name.
pub const HOST_VARIABLE: &str = "_host";

/// Everything an engine may touch during one run.
///
/// The engine may change the number of images, their sizes and the label
/// text in place. Emptying an image (zero size) frees its slot for reuse.
pub struct EngineJob<'a> {
    pub command: &'a str,
    pub images: &'a mut Vec<PlanarImage>,
    pub labels: &'a mut Vec<String>,
    pub progress: Option<&'a Progress>,
    /// Poll with `stop.check()?` at convenient checkpoints.
    pub stop: &'a dyn Stop,
}

/// An external image-processing engine.
pub trait Engine {
    /// Engine release number; selects the `update<version>.gmic` bundle.
    fn version(&self) -> u32;

    /// Parse additional command definitions.
    fn add_commands(&mut self, source: &mut dyn Read) -> Result<(), EngineFault>;

    fn set_variable(&mut self, name: &str, value: &str);

    /// Interpret `job.command` against the job's images.
    fn run(&mut self, job: EngineJob<'_>) -> Result<(), EngineFault>;
}

/// Options for one engine run.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions<'a> {
    pub command: &'a str,
    pub custom_resource_path: Option<&'a Path>,
    pub host_name: Option<&'a str>,
    pub progress: Option<&'a Progress>,
    pub abort: Option<&'a AbortFlag>,
}

impl<'a> RunOptions<'a> {
    pub fn new(command: &'a str) -> Self {
        Self {
            command,
            ..Default::default()
        }
    }

    pub fn with_resource_path(mut self, path: &'a Path) -> Self {
        self.custom_resource_path = Some(path);
        self
    }

    pub fn with_host_name(mut self, name: &'a str) -> Self {
        self.host_name = Some(name);
        self
    }

    pub fn with_progress(mut self, progress: &'a Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_abort(mut self, abort: &'a AbortFlag) -> Self {
        self.abort = Some(abort);
        self
    }
}

/// Run `options.command` over `list` with an engine built by `make_engine`.
///
/// Resource paths are initialized first; if that fails the engine is never
/// built. Labels are brought back in step with images after the run,
/// whether it succeeded or not.
pub fn run<E, F>(list: &mut ImageList, options: &RunOptions<'_>, make_engine: F) -> Result<(), PlanarError>
where
    E: Engine,
    F: FnOnce() -> Result<E, EngineFault>,
{
    let paths = ResourcePaths::init(options.custom_resource_path)?;
    let mut engine = make_engine()?;
    paths.load_extensions(&mut engine);
    engine.set_variable(
        HOST_VARIABLE,
        options.host_name.unwrap_or(DEFAULT_HOST_NAME),
    );

    let stop: &dyn Stop = match options.abort {
        Some(flag) => flag,
        None => &Unstoppable,
    };
    let (images, labels) = list.parts_mut();
    tracing::debug!(command = options.command, images = images.len(), "engine run");
    let result = engine.run(EngineJob {
        command: options.command,
        images,
        labels,
        progress: options.progress,
        stop,
    });
    list.reconcile_labels();
    result.map_err(PlanarError::from)
}

/// [`run`] for hosts that only understand status codes.
///
/// No error or panic escapes. When the run ends in an engine failure, its
/// command and message are copied, truncated, into `error_info`.
pub fn run_with_status<E, F>(
    list: &mut ImageList,
    options: &RunOptions<'_>,
    error_info: Option<&mut ErrorInfo>,
    make_engine: F,
) -> Status
where
    E: Engine,
    F: FnOnce() -> Result<E, EngineFault>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| run(list, options, make_engine)));
    let result = outcome.unwrap_or_else(|payload| {
        list.reconcile_labels();
        Err(PlanarError::Unknown(panic_message(payload.as_ref())))
    });

    let Err(error) = result else {
        return Status::Ok;
    };
    let status = error.status();
    tracing::debug!(?status, %error, "engine run failed");
    if let (Status::EngineError, Some(info)) = (status, error_info) {
        info.record(&error);
    }
    status
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "engine panicked".to_string()
    }
}
