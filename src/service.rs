//! Submission and retrieval of diffs

use crate::{
    error::{Error, Result},
    id::{DiffId, IdGenerator, RandomIds},
    lines::split_lines,
    render::{RenderOptions, Renderer, Rendering},
    store::{DiffRecord, DiffStore},
};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info};

/// Body of an upload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Upload {
    old_data: String,
    new_data: String,
}

/// A stored diff and its summary
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub id: DiffId,
    /// The changed lines, rendered in the summary view
    pub summary: String,
}

/// A stored diff re-rendered in the full view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Retrieval {
    pub id: DiffId,
    pub record: DiffRecord,
    pub rendering: Rendering,
}

impl Retrieval {
    /// The unified diff document handed to the viewer
    pub fn document(&self) -> String {
        self.rendering.document().to_string()
    }
}

/// Renders submitted text pairs and keeps them in a [`DiffStore`].
///
/// Only the raw texts are stored; every retrieval renders the diff again.
///
/// ```
/// use diffkeep::{DiffService, MemoryStore};
///
/// let service = DiffService::new(MemoryStore::new());
/// let submission = service.submit("a\nb\nc", "a\nx\nc").unwrap();
/// assert_eq!(submission.summary, "2 - \n2 + bx\n");
///
/// let retrieval = service.retrieve(&submission.id.to_string()).unwrap();
/// assert_eq!(retrieval.rendering.to_string(), " a\n-\n+bx\n c\n");
/// ```
pub struct DiffService {
    store: Box<dyn DiffStore>,
    ids: Box<dyn IdGenerator>,
    renderer: Renderer,
}

impl DiffService {
    pub fn new(store: impl DiffStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            ids: Box::new(RandomIds),
            renderer: Renderer::default(),
        }
    }

    /// Use `options` when rendering
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.renderer = Renderer::new(options);
        self
    }

    /// Draw identifiers for new diffs from `ids`
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Store a pair of texts if any line differs.
    ///
    /// Fails with [`Error::NoChangeDetected`] when every line is identical, in which case nothing
    /// is stored.
    pub fn submit(&self, old_data: &str, new_data: &str) -> Result<Submission> {
        let start = Instant::now();
        let record = DiffRecord::new(old_data, new_data);

        let summary = self
            .render_summary(&record)?
            .ok_or(Error::NoChangeDetected)?;

        let id = self.ids.next_id();
        self.store.put(&id, &record)?;

        info!(
            %id,
            changed_lines = summary.changed_lines(),
            duration_ms = start.elapsed().as_millis() as u64,
            "stored diff"
        );

        Ok(Submission {
            id,
            summary: summary.to_string(),
        })
    }

    /// Like [`submit`](Self::submit), taking a JSON body `{"oldData": ..., "newData": ...}`.
    pub fn submit_json(&self, body: &[u8]) -> Result<Submission> {
        let upload: Upload = serde_json::from_slice(body)?;
        self.submit(&upload.old_data, &upload.new_data)
    }

    /// Look up a stored diff and render it in the full view.
    ///
    /// A `raw_id` which is not a canonical UUID is reported as [`Error::RecordNotFound`] without
    /// consulting the store.
    pub fn retrieve(&self, raw_id: &str) -> Result<Retrieval> {
        let (id, record) = self.load(raw_id)?;
        let old_lines = split_lines(record.old_text());
        let new_lines = split_lines(record.new_text());
        let rendering = self.renderer.render(&old_lines, &new_lines)?;

        info!(%id, changed_lines = rendering.changed_lines(), "retrieved diff");
        Ok(Retrieval {
            id,
            record,
            rendering,
        })
    }

    /// Render the summary of a stored diff again; identical to the one returned when it was
    /// submitted.
    pub fn retrieve_summary(&self, raw_id: &str) -> Result<String> {
        let (_, record) = self.load(raw_id)?;
        let summary = self
            .render_summary(&record)?
            .ok_or(Error::NoChangeDetected)?;
        Ok(summary.to_string())
    }

    fn load(&self, raw_id: &str) -> Result<(DiffId, DiffRecord)> {
        let Some(id) = DiffId::parse(raw_id) else {
            debug!(raw_id, "malformed diff id");
            return Err(Error::record_not_found(raw_id));
        };

        match self.store.get(&id)? {
            Some(record) => Ok((id, record)),
            None => Err(Error::record_not_found(id.to_string())),
        }
    }

    fn render_summary(&self, record: &DiffRecord) -> Result<Option<Rendering>> {
        let old_lines = split_lines(record.old_text());
        let new_lines = split_lines(record.new_text());
        Ok(self.renderer.render_changes(&old_lines, &new_lines)?)
    }
}
