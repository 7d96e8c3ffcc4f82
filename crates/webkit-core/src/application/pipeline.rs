//! Command pipeline: an ordered list of producers sharing one input.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{debug, info, instrument};

use crate::application::{
    ApplicationError,
    engine::Generator,
    ports::{Filesystem, NoopNotifier, NoopPrinter, Notifier, Printer},
    tracker::Tracker,
};
use crate::domain::{DEFINITION_FILE, Definition, Manifest};
use crate::error::WebkitResult;

/// Read and parse `app.json` from the root of `fs`.
pub fn load_definition(fs: &dyn Filesystem) -> WebkitResult<Definition> {
    let path = Path::new(DEFINITION_FILE);
    if !fs.exists(path) {
        return Err(ApplicationError::DefinitionMissing {
            path: path.to_path_buf(),
        }
        .into());
    }

    let data = fs.read_file(path)?;
    serde_json::from_slice(&data).map_err(|e| {
        ApplicationError::DefinitionParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

// ── Run context ───────────────────────────────────────────────────────────

/// Per-run state shared with producers. Cloning shares the cancel flag.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    cancelled: Arc<AtomicBool>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once [`cancel`](Self::cancel) has been called.
    pub fn check(&self) -> WebkitResult<()> {
        if self.is_cancelled() {
            Err(ApplicationError::Cancelled.into())
        } else {
            Ok(())
        }
    }
}

// ── Command input ─────────────────────────────────────────────────────────

/// Everything a producer may use.
pub struct CommandInput {
    fs: Arc<dyn Filesystem>,
    definition_fs: Arc<dyn Filesystem>,
    definition: OnceLock<Definition>,
    tracker: Arc<Tracker>,
    generator: Generator,
    printer: Arc<dyn Printer>,
    previous: Option<Manifest>,
    orphans: Mutex<Vec<String>>,
}

impl CommandInput {
    pub fn builder(fs: Arc<dyn Filesystem>) -> CommandInputBuilder {
        CommandInputBuilder::new(fs)
    }

    /// The target filesystem. Producers may read from it; tracked writes go
    /// through [`generator`](Self::generator).
    pub fn fs(&self) -> &dyn Filesystem {
        self.fs.as_ref()
    }

    /// The project definition, read on first access and cached.
    pub fn definition(&self) -> WebkitResult<&Definition> {
        if let Some(def) = self.definition.get() {
            return Ok(def);
        }
        let def = load_definition(self.definition_fs.as_ref())?;
        Ok(self.definition.get_or_init(|| def))
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn printer(&self) -> &dyn Printer {
        self.printer.as_ref()
    }

    /// The manifest from the last run, if there was one.
    pub fn previous_manifest(&self) -> Option<&Manifest> {
        self.previous.as_ref()
    }

    /// Record a generated file that the current definition no longer produces.
    pub fn note_orphan(&self, path: impl Into<String>) {
        self.orphans
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.into());
    }

    pub fn orphans(&self) -> Vec<String> {
        self.orphans.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

pub struct CommandInputBuilder {
    fs: Arc<dyn Filesystem>,
    definition_fs: Option<Arc<dyn Filesystem>>,
    definition: Option<Definition>,
    tracker: Option<Arc<Tracker>>,
    printer: Arc<dyn Printer>,
    notifier: Arc<dyn Notifier>,
    previous: Option<Manifest>,
    scaffold_only: bool,
}

impl CommandInputBuilder {
    fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self {
            fs,
            definition_fs: None,
            definition: None,
            tracker: None,
            printer: Arc::new(NoopPrinter),
            notifier: Arc::new(NoopNotifier),
            previous: None,
            scaffold_only: false,
        }
    }

    /// Use an already-loaded definition instead of reading `app.json`.
    pub fn definition(mut self, definition: Definition) -> Self {
        self.definition = Some(definition);
        self
    }

    /// Read `app.json` from a different filesystem than the one written to.
    pub fn definition_fs(mut self, fs: Arc<dyn Filesystem>) -> Self {
        self.definition_fs = Some(fs);
        self
    }

    pub fn tracker(mut self, tracker: Arc<Tracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn printer(mut self, printer: Arc<dyn Printer>) -> Self {
        self.printer = printer;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn previous_manifest(mut self, manifest: Option<Manifest>) -> Self {
        self.previous = manifest;
        self
    }

    /// Build the engine in create-if-absent mode.
    pub fn scaffold_only(mut self) -> Self {
        self.scaffold_only = true;
        self
    }

    pub fn build(self) -> CommandInput {
        let tracker = self
            .tracker
            .unwrap_or_else(|| Arc::new(Tracker::new(crate::VERSION_TAG)));

        let mut generator = Generator::new(self.fs.clone(), tracker.clone(), self.notifier);
        if self.scaffold_only {
            generator = generator.scaffold_only();
        }

        let definition = OnceLock::new();
        if let Some(def) = self.definition {
            let _ = definition.set(def);
        }

        CommandInput {
            definition_fs: self.definition_fs.unwrap_or_else(|| self.fs.clone()),
            fs: self.fs,
            definition,
            tracker,
            generator,
            printer: self.printer,
            previous: self.previous,
            orphans: Mutex::new(Vec::new()),
        }
    }
}

// ── Producers & pipeline ──────────────────────────────────────────────────

pub type ProducerFn = fn(&RunContext, &CommandInput) -> WebkitResult<()>;

/// A named unit of work that emits zero or more files.
#[derive(Clone, Copy)]
pub struct Producer {
    pub name: &'static str,
    pub run: ProducerFn,
}

impl Producer {
    pub const fn new(name: &'static str, run: ProducerFn) -> Self {
        Self { name, run }
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer").field("name", &self.name).finish()
    }
}

/// Producers executed in order, then finalized.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    producers: Vec<Producer>,
}

impl Pipeline {
    pub fn new(producers: impl IntoIterator<Item = Producer>) -> Self {
        Self {
            producers: producers.into_iter().collect(),
        }
    }

    pub fn producers(&self) -> &[Producer] {
        &self.producers
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.producers.iter().map(|p| p.name).collect()
    }

    /// A pipeline holding only the named producer.
    pub fn only(&self, name: &str) -> Option<Pipeline> {
        self.producers
            .iter()
            .find(|p| p.name == name)
            .map(|p| Pipeline::new([*p]))
    }

    pub fn then(mut self, producer: Producer) -> Self {
        self.producers.push(producer);
        self
    }

    /// Run each producer; the first failure aborts. On success the engine is
    /// finalized. A cancelled run never finalizes.
    #[instrument(skip_all, fields(producers = self.producers.len()))]
    pub fn run(&self, ctx: &RunContext, input: &CommandInput) -> WebkitResult<()> {
        for producer in &self.producers {
            ctx.check()?;
            debug!(producer = producer.name, "Running producer");
            (producer.run)(ctx, input)?;
        }

        ctx.check()?;
        input.generator().finalize()?;
        info!(files = input.tracker().len(), "Pipeline complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::WriteOptions;
    use crate::application::test_support::FakeFs;
    use crate::domain::{MANIFEST_PATH, Source};
    use crate::error::WebkitError;

    const APP_JSON: &str = r#"{ "project": { "name": "my-site" }, "apps": [] }"#;

    fn write_name(_: &RunContext, input: &CommandInput) -> WebkitResult<()> {
        let def = input.definition()?;
        input.generator().write_bytes(
            "name.txt",
            def.project.name.as_bytes(),
            WriteOptions::new().with_tracking(Source::project(), "files::name"),
        )?;
        Ok(())
    }

    fn fail(_: &RunContext, _: &CommandInput) -> WebkitResult<()> {
        Err(ApplicationError::Write {
            path: "boom".into(),
            reason: "nope".into(),
        }
        .into())
    }

    fn cancel(ctx: &RunContext, _: &CommandInput) -> WebkitResult<()> {
        ctx.cancel();
        Ok(())
    }

    fn fs_with_definition() -> Arc<FakeFs> {
        let fs = Arc::new(FakeFs::new());
        fs.put(DEFINITION_FILE, APP_JSON);
        fs
    }

    #[test]
    fn runs_producers_then_finalizes() {
        let fs = fs_with_definition();
        let input = CommandInput::builder(fs.clone()).build();

        Pipeline::new([Producer::new("name", write_name)])
            .run(&RunContext::new(), &input)
            .unwrap();

        assert_eq!(fs.text("name.txt").unwrap(), "my-site");
        assert!(fs.text(MANIFEST_PATH).unwrap().contains("files::name"));
    }

    #[test]
    fn first_failure_aborts_without_manifest() {
        let fs = fs_with_definition();
        let input = CommandInput::builder(fs.clone()).build();

        let err = Pipeline::new([Producer::new("fail", fail), Producer::new("name", write_name)])
            .run(&RunContext::new(), &input)
            .unwrap_err();

        assert!(matches!(err, WebkitError::Application(ApplicationError::Write { .. })));
        assert!(fs.text("name.txt").is_none());
        assert!(fs.text(MANIFEST_PATH).is_none());
    }

    #[test]
    fn cancellation_stops_before_next_producer() {
        let fs = fs_with_definition();
        let input = CommandInput::builder(fs.clone()).build();

        let err = Pipeline::new([Producer::new("cancel", cancel), Producer::new("name", write_name)])
            .run(&RunContext::new(), &input)
            .unwrap_err();

        assert_eq!(err, WebkitError::Application(ApplicationError::Cancelled));
        assert!(fs.text("name.txt").is_none());
        assert!(fs.text(MANIFEST_PATH).is_none());
    }

    #[test]
    fn definition_is_cached() {
        let fs = fs_with_definition();
        let input = CommandInput::builder(fs.clone()).build();
        let first = input.definition().unwrap() as *const Definition;

        fs.put(DEFINITION_FILE, r#"{ "project": { "name": "changed" } }"#);
        let second = input.definition().unwrap();

        assert_eq!(first, second as *const Definition);
        assert_eq!(second.project.name, "my-site");
    }

    #[test]
    fn preset_definition_skips_disk() {
        let fs = Arc::new(FakeFs::new());
        let def: Definition = serde_json::from_str(APP_JSON).unwrap();
        let input = CommandInput::builder(fs).definition(def).build();
        assert_eq!(input.definition().unwrap().project.name, "my-site");
    }

    #[test]
    fn missing_and_malformed_definitions_differ() {
        let fs = FakeFs::new();
        assert!(matches!(
            load_definition(&fs),
            Err(WebkitError::Application(ApplicationError::DefinitionMissing { .. }))
        ));

        fs.put(DEFINITION_FILE, "{");
        assert!(matches!(
            load_definition(&fs),
            Err(WebkitError::Application(ApplicationError::DefinitionParse { .. }))
        ));
    }

    #[test]
    fn only_selects_one_producer() {
        let pipeline = Pipeline::new([Producer::new("a", cancel), Producer::new("b", fail)]);
        assert_eq!(pipeline.only("b").unwrap().names(), vec!["b"]);
        assert!(pipeline.only("c").is_none());
    }
}
