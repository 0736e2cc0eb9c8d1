use thiserror::Error;

/// Result alias used across the graph core.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the core can report. All of them are recoverable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
	/// A node with this id already exists.
	#[error("Node already exists: {0}")]
	DuplicateId(String),

	/// An edge endpoint does not name an existing node.
	#[error("Unknown edge endpoint: {0}")]
	UnknownEndpoint(String),

	/// The edge (or its mirror, for undirected graphs) already exists.
	#[error("Edge already exists: {from} -> {to}")]
	DuplicateEdge {
		/// Source node id.
		from: String,
		/// Target node id.
		to: String,
	},

	/// The edge weight is negative or not a finite number.
	#[error("Invalid edge weight: {0}")]
	InvalidWeight(f64),

	/// A persisted document could not be decoded.
	#[error("Malformed document: {0}")]
	MalformedDocument(String),

	/// An algorithm was asked to start or end at a node that is not in the graph.
	#[error("Unknown node: {0}")]
	UnknownNode(String),

	/// Playback was requested while another run is still being played.
	#[error("A run is already being played")]
	AlreadyRunning,

	/// The visualizer configuration is out of range.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::MalformedDocument(err.to_string())
	}
}
