//! Event values and their normalization.
//!
//! Callers may send either a bare event name or a full [`Event`]. Both
//! shapes collapse into an [`Event`] through `Into<Event<E>>`, so the
//! dispatcher only ever sees the canonical form.

use crate::error::MachineError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The type of an event.
///
/// `Initial` marks the event carried by a machine's first snapshot. It is
/// never dispatched: sending an event of this kind is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind<E> {
    /// Marker for the snapshot a machine starts in
    Initial,
    /// A user event declared in some state's transition table
    Named(E),
}

/// An event together with its optional, opaque payload.
///
/// # Example
///
/// ```rust
/// use reactive_fsm::{Event, EventKind};
/// use serde_json::json;
///
/// let bare: Event<&str> = "fetch".into();
/// assert_eq!(bare.kind, EventKind::Named("fetch"));
/// assert!(bare.payload.is_none());
///
/// let full = Event::new("fetch").with_payload(json!({ "id": 1 }));
/// assert_eq!(full.name(), Some(&"fetch"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event<E> {
    /// Event type
    pub kind: EventKind<E>,
    /// Opaque data supplied by the sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl<E> Event<E> {
    /// Create a named event without payload.
    pub fn new(name: E) -> Self {
        Self {
            kind: EventKind::Named(name),
            payload: None,
        }
    }

    pub(crate) fn initial() -> Self {
        Self {
            kind: EventKind::Initial,
            payload: None,
        }
    }

    /// Attach a payload, replacing any previous one.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// The event name, or `None` for the initial marker.
    pub fn name(&self) -> Option<&E> {
        match &self.kind {
            EventKind::Named(name) => Some(name),
            EventKind::Initial => None,
        }
    }

    /// Whether this is the initial marker event.
    pub fn is_initial(&self) -> bool {
        matches!(self.kind, EventKind::Initial)
    }

    /// Decode the payload into a concrete type.
    ///
    /// Returns `Ok(None)` when the event carries no payload.
    ///
    /// # Example
    ///
    /// ```rust
    /// use reactive_fsm::Event;
    /// use serde_json::json;
    ///
    /// let event = Event::new("resize").with_payload(json!([80, 24]));
    /// let size: Option<(u16, u16)> = event.payload_as().unwrap();
    /// assert_eq!(size, Some((80, 24)));
    /// ```
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<Option<T>, MachineError> {
        self.payload
            .clone()
            .map(serde_json::from_value)
            .transpose()
            .map_err(MachineError::from)
    }
}

impl<E> From<E> for Event<E> {
    fn from(name: E) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_name_normalizes_to_named_event() {
        let event: Event<&str> = "evt1".into();

        assert_eq!(event, Event::new("evt1"));
        assert_eq!(event.name(), Some(&"evt1"));
        assert!(event.payload.is_none());
    }

    #[test]
    fn full_event_passes_through_unchanged() {
        let event = Event::new("evt1").with_payload(json!(1));
        let normalized: Event<&str> = event.clone().into();

        assert_eq!(normalized, event);
        assert_eq!(normalized.payload, Some(json!(1)));
    }

    #[test]
    fn initial_marker_has_no_name() {
        let event = Event::<&str>::initial();

        assert!(event.is_initial());
        assert_eq!(event.name(), None);
    }

    #[test]
    fn payload_decodes_into_requested_type() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Person {
            name: String,
            age: u8,
        }

        let event = Event::new("loaded").with_payload(json!({ "name": "Ada", "age": 36 }));
        let person: Option<Person> = event.payload_as().unwrap();

        assert_eq!(
            person,
            Some(Person {
                name: "Ada".to_string(),
                age: 36,
            })
        );
    }

    #[test]
    fn missing_payload_decodes_to_none() {
        let event = Event::new("loaded");
        let value: Option<u32> = event.payload_as().unwrap();

        assert_eq!(value, None);
    }

    #[test]
    fn mismatched_payload_reports_error() {
        let event = Event::new("loaded").with_payload(json!("not a number"));
        let result: Result<Option<u32>, _> = event.payload_as();

        assert!(matches!(result, Err(MachineError::Payload(_))));
    }

    #[test]
    fn event_serializes_without_empty_payload() {
        let json = serde_json::to_value(Event::new("evt1")).unwrap();

        assert_eq!(json, json!({ "kind": { "Named": "evt1" } }));
    }
}
