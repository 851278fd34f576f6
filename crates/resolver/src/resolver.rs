//! The debounced metadata resolver state machine.
//!
//! # Lifecycle of one resolution
//!
//! 1. [`MetadataResolver::on_identifier_changed`] cancels the pending timer.
//!    If the text mentions the host marker a fresh [`DebounceTimer`] is armed,
//!    otherwise nothing is scheduled and validation is left as it was.
//! 2. When the timer fires it posts [`ResolverEvent::DebounceElapsed`]. The
//!    event is only honored if its generation matches the armed timer.
//! 3. The text is parsed. Failure ends in [`ResolveError::InvalidFormat`]
//!    without touching the network. Success moves to
//!    [`ValidationState::Pending`], mints a [`RequestToken`], and spawns one
//!    lookup.
//! 4. The lookup posts [`ResolverEvent::LookupFinished`]. Results whose token
//!    is not the outstanding one are dropped.
//!
//! All mutation happens on the task that owns the resolver; spawned tasks only
//! send events back over the channel.

use std::fmt;
use std::sync::Arc;

use repodeck_lookup::{LookupError, MetadataLookup};
use repodeck_primitives::{Category, RepoIdentifier, RepoMetadata};
use repodeck_worker::{DebounceTimer, GenerationClock, TaskClass, spawn};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{FormState, ResolveError, ResolvedFields, ResolvedSubmission, ResolverConfig, SubmitBlocked, ValidationState};

/// Identifies one lookup; larger tokens supersede smaller ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// The lookup currently allowed to mutate the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
	pub identifier: RepoIdentifier,
	pub token: RequestToken,
}

/// Asynchronous notifications delivered back to the owning task.
#[derive(Debug)]
pub enum ResolverEvent {
	DebounceElapsed {
		generation: u64,
	},
	LookupFinished {
		token: RequestToken,
		result: Result<RepoMetadata, LookupError>,
	},
}

/// What handling an event or command did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
	/// Stale or irrelevant; nothing changed.
	Ignored,
	/// A lookup was issued.
	Pending(RequestToken),
	/// Metadata was merged and the form is valid.
	Resolved,
	/// Validation failed with the given reason.
	Invalid(ResolveError),
}

/// Debounced, token-guarded resolver owned by the add-repository form.
pub struct MetadataResolver {
	lookup: Arc<dyn MetadataLookup>,
	config: ResolverConfig,
	form: FormState,
	debounce_clock: GenerationClock,
	timer: Option<DebounceTimer>,
	request_clock: GenerationClock,
	outstanding: Option<LookupRequest>,
	last_resolved: Option<RepoIdentifier>,
	events_tx: mpsc::UnboundedSender<ResolverEvent>,
	events_rx: mpsc::UnboundedReceiver<ResolverEvent>,
	disposed: bool,
}

impl fmt::Debug for MetadataResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MetadataResolver")
			.field("config", &self.config)
			.field("form", &self.form)
			.field("timer", &self.timer.as_ref().map(DebounceTimer::generation))
			.field("outstanding", &self.outstanding)
			.field("disposed", &self.disposed)
			.finish()
	}
}

impl MetadataResolver {
	pub fn new(lookup: Arc<dyn MetadataLookup>, config: ResolverConfig) -> Self {
		let (events_tx, events_rx) = mpsc::unbounded_channel();
		Self {
			lookup,
			config,
			form: FormState::default(),
			debounce_clock: GenerationClock::new(),
			timer: None,
			request_clock: GenerationClock::new(),
			outstanding: None,
			last_resolved: None,
			events_tx,
			events_rx,
			disposed: false,
		}
	}

	pub fn form(&self) -> &FormState {
		&self.form
	}

	pub fn fields(&self) -> &ResolvedFields {
		&self.form.resolved
	}

	pub fn validation(&self) -> ValidationState {
		self.form.validation
	}

	pub fn config(&self) -> &ResolverConfig {
		&self.config
	}

	/// Submission is only allowed once the identifier resolved.
	pub fn can_submit(&self) -> bool {
		!self.disposed && self.form.validation.is_valid()
	}

	/// Lookup that may still mutate the form, if any.
	pub fn outstanding(&self) -> Option<&LookupRequest> {
		self.outstanding.as_ref()
	}

	/// Returns true while a debounce timer is armed.
	pub fn is_debouncing(&self) -> bool {
		self.timer.is_some()
	}

	/// Returns true when no timer is armed and no lookup is outstanding.
	pub fn is_idle(&self) -> bool {
		self.timer.is_none() && self.outstanding.is_none()
	}

	pub fn is_disposed(&self) -> bool {
		self.disposed
	}

	/// Records a keystroke in the identifier field.
	///
	/// Never performs the lookup itself; at most it arms the debounce timer.
	pub fn on_identifier_changed(&mut self, text: impl Into<String>) {
		if self.disposed {
			return;
		}
		let text = text.into();
		self.cancel();
		let armed = self.config.is_armed_by(&text);
		self.form.identifier_text = text;
		if armed {
			self.schedule();
		}
	}

	pub fn set_name(&mut self, name: impl Into<String>) {
		self.form.resolved.name = name.into();
	}

	pub fn set_title(&mut self, title: impl Into<String>) {
		self.form.resolved.title = title.into();
	}

	pub fn set_description(&mut self, description: impl Into<String>) {
		self.form.resolved.description = description.into();
	}

	pub fn set_category(&mut self, category: Category) {
		self.form.resolved.category = category;
	}

	/// Arms a fresh debounce timer, replacing any pending one.
	pub fn schedule(&mut self) {
		if self.disposed {
			return;
		}
		self.cancel();
		let generation = self.debounce_clock.next();
		let tx = self.events_tx.clone();
		self.timer = Some(DebounceTimer::start(generation, self.config.debounce(), move |generation| {
			let _ = tx.send(ResolverEvent::DebounceElapsed { generation });
		}));
		debug!(generation, "resolver.debounce.scheduled");
	}

	/// Cancels the pending debounce timer, if any.
	pub fn cancel(&mut self) {
		if let Some(timer) = self.timer.take() {
			timer.cancel();
			debug!(generation = timer.generation(), "resolver.debounce.cancelled");
		}
	}

	/// Closes the debounce window now instead of waiting for the timer.
	///
	/// Used when the host needs an answer immediately (blur, Enter, submit).
	/// Unlike a keystroke this validates even text without the host marker.
	pub fn flush(&mut self) -> Transition {
		if self.disposed {
			return Transition::Ignored;
		}
		self.cancel();
		self.resolve_current()
	}

	/// Applies one event from the resolver's channel.
	pub fn handle(&mut self, event: ResolverEvent) -> Transition {
		if self.disposed {
			return Transition::Ignored;
		}
		match event {
			ResolverEvent::DebounceElapsed { generation } => {
				if self.timer.as_ref().map(DebounceTimer::generation) != Some(generation) {
					debug!(generation, "resolver.debounce.stale");
					return Transition::Ignored;
				}
				self.timer = None;
				self.resolve_current()
			}
			ResolverEvent::LookupFinished { token, result } => self.apply_result(token, result),
		}
	}

	/// Applies a lookup result if `token` is the outstanding request.
	pub fn apply_result(&mut self, token: RequestToken, result: Result<RepoMetadata, LookupError>) -> Transition {
		if self.disposed {
			return Transition::Ignored;
		}
		let Some(request) = self.outstanding.take_if(|request| request.token == token) else {
			debug!(%token, outstanding = ?self.outstanding.as_ref().map(|r| r.token), "resolver.lookup.stale");
			return Transition::Ignored;
		};

		match result {
			Ok(metadata) => {
				let detected = self.form.resolved.merge(&metadata);
				self.form.validation = ValidationState::Valid;
				debug!(%token, repo = %request.identifier, category = ?detected, "resolver.lookup.resolved");
				self.last_resolved = Some(request.identifier);
				Transition::Resolved
			}
			Err(err) if err.is_not_found() => {
				debug!(%token, repo = %request.identifier, "resolver.lookup.not_found");
				self.invalidate(ResolveError::NotFound)
			}
			Err(err) => {
				warn!(%token, repo = %request.identifier, error = %err, "metadata lookup failed");
				self.invalidate(ResolveError::LookupFailed)
			}
		}
	}

	/// Waits for the next event and applies it.
	///
	/// Only await this while [`Self::is_idle`] is false; an idle resolver has
	/// nothing left to deliver.
	pub async fn step(&mut self) -> Option<Transition> {
		let event = self.events_rx.recv().await?;
		Some(self.handle(event))
	}

	/// Applies events until no timer is armed and no lookup is outstanding.
	///
	/// Returns the last non-ignored transition, if any.
	pub async fn settle(&mut self) -> Option<Transition> {
		let mut last = None;
		while !self.disposed && !self.is_idle() {
			match self.step().await {
				Some(Transition::Ignored) => {}
				Some(transition) => last = Some(transition),
				None => break,
			}
		}
		last
	}

	/// Applies every event that is already queued without waiting.
	///
	/// Returns the number of events that changed the form.
	pub fn pump(&mut self) -> usize {
		let mut applied = 0;
		while let Ok(event) = self.events_rx.try_recv() {
			if self.handle(event) != Transition::Ignored {
				applied += 1;
			}
		}
		applied
	}

	/// Returns the submission payload when the form is valid.
	///
	/// The payload names the repository of the lookup that made the form
	/// valid, not whatever the field holds while a newer edit is debouncing.
	pub fn submit(&self) -> Result<ResolvedSubmission, SubmitBlocked> {
		let blocked = || SubmitBlocked {
			state: self.form.validation,
		};
		let identifier = match &self.last_resolved {
			Some(identifier) if self.can_submit() => identifier.clone(),
			_ => return Err(blocked()),
		};
		Ok(ResolvedSubmission {
			url: identifier.html_url(),
			identifier,
			fields: self.form.resolved.clone(),
		})
	}

	/// Tears the resolver down. No lookup is issued and no state changes
	/// afterwards.
	pub fn dispose(&mut self) {
		if self.disposed {
			return;
		}
		self.cancel();
		self.outstanding = None;
		self.disposed = true;
		self.events_rx.close();
		debug!("resolver.disposed");
	}

	fn resolve_current(&mut self) -> Transition {
		let identifier = match RepoIdentifier::parse(&self.form.identifier_text) {
			Ok(identifier) => identifier,
			Err(err) => {
				debug!(error = %err, "resolver.identifier.invalid");
				self.outstanding = None;
				return self.invalidate(ResolveError::InvalidFormat);
			}
		};

		let token = RequestToken(self.request_clock.next());
		self.outstanding = Some(LookupRequest {
			identifier: identifier.clone(),
			token,
		});
		self.form.validation = ValidationState::Pending;
		debug!(%token, repo = %identifier, "resolver.lookup.issued");

		let lookup = Arc::clone(&self.lookup);
		let tx = self.events_tx.clone();
		spawn(TaskClass::Lookup, async move {
			let result = lookup.fetch(&identifier).await;
			let _ = tx.send(ResolverEvent::LookupFinished { token, result });
		});
		Transition::Pending(token)
	}

	fn invalidate(&mut self, reason: ResolveError) -> Transition {
		self.form.validation = ValidationState::Invalid(reason);
		Transition::Invalid(reason)
	}
}

impl Drop for MetadataResolver {
	fn drop(&mut self) {
		self.dispose();
	}
}
