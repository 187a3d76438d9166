use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use gridsnake_core::{decode_le_cells, BodyView, CellIndex, DecodeError, GridWidth, Status};
use gridsnake_world::{query, World};
use thiserror::Error;

use crate::frame::MAX_RENDER_WIDTH;

const SNAPSHOT_DOMAIN: &str = "snake";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "snake:v1";
/// Delimiter used to separate the prefix, width, status and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of the exported body and grid state after a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrameSnapshot {
    /// Number of cells along one grid edge.
    pub(crate) width: u32,
    /// Status of the game when captured.
    pub(crate) status: Status,
    /// Body cells, head first.
    pub(crate) cells: Vec<CellIndex>,
}

impl FrameSnapshot {
    /// Copies the exported body of `world` into a snapshot.
    #[must_use]
    pub(crate) fn capture(world: &World) -> Self {
        Self {
            width: query::width(world),
            status: query::status(world),
            cells: query::body(world).cells().to_vec(),
        }
    }

    /// Borrows the captured cells as a body view.
    #[must_use]
    pub(crate) fn body(&self) -> BodyView<'_> {
        BodyView::new(&self.cells, GridWidth::new(self.width))
    }

    /// Encodes the snapshot into a single-line string.
    ///
    /// The payload is the little-endian body buffer in unpadded base64.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let encoded = STANDARD_NO_PAD.encode(self.body().to_le_bytes());
        format!(
            "{SNAPSHOT_HEADER}:{}:{}:{encoded}",
            self.width,
            self.status.code()
        )
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, FrameTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FrameTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(FrameTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(FrameTransferError::MissingVersion)?;
        let width = parts.next().ok_or(FrameTransferError::MissingWidth)?;
        let status = parts.next().ok_or(FrameTransferError::MissingStatus)?;
        let payload = parts.next().ok_or(FrameTransferError::MissingPayload)?;
        if parts.next().is_some() {
            return Err(FrameTransferError::TrailingFields);
        }

        if domain != SNAPSHOT_DOMAIN {
            return Err(FrameTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(FrameTransferError::UnsupportedVersion(version.to_owned()));
        }

        let width = parse_width(width)?;
        let status = status
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(Status::from_code)
            .ok_or_else(|| FrameTransferError::InvalidStatus(status.to_owned()))?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(FrameTransferError::InvalidEncoding)?;
        let cells = decode_le_cells(&bytes)?;
        if cells.is_empty() {
            return Err(FrameTransferError::EmptyBody);
        }

        let grid = GridWidth::new(width);
        if let Some(cell) = cells.iter().find(|cell| !grid.contains(**cell)) {
            return Err(FrameTransferError::CellOutOfRange {
                cell: cell.get(),
                width,
            });
        }

        Ok(Self {
            width,
            status,
            cells,
        })
    }
}

/// Errors that can occur while decoding frame snapshot strings.
#[derive(Debug, Error)]
pub(crate) enum FrameTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("frame payload was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    #[error("frame string is missing the prefix")]
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    #[error("frame string is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include the grid width.
    #[error("frame string is missing the grid width")]
    MissingWidth,
    /// The encoded snapshot did not include the status code.
    #[error("frame string is missing the status")]
    MissingStatus,
    /// The encoded snapshot did not include the payload segment.
    #[error("frame string is missing the payload")]
    MissingPayload,
    /// Fields followed the payload segment.
    #[error("frame string has fields after the payload")]
    TrailingFields,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("frame prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("frame version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid width could not be parsed.
    #[error("could not parse grid width '{0}'")]
    InvalidWidth(String),
    /// The grid is wider than the text board can draw.
    #[error("grid width {width} exceeds the drawable maximum of {maximum}")]
    WidthTooLarge {
        /// Width carried by the snapshot.
        width: u32,
        /// Widest grid accepted by the decoder.
        maximum: u32,
    },
    /// The status code is unknown.
    #[error("unknown status code '{0}'")]
    InvalidStatus(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode frame payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload carried no body cells.
    #[error("frame payload holds no body cells")]
    EmptyBody,
    /// The decoded payload is not a whole number of cells.
    #[error(transparent)]
    InvalidCells(#[from] DecodeError),
    /// A decoded cell lies outside the grid.
    #[error("cell {cell} lies outside a grid of width {width}")]
    CellOutOfRange {
        /// Offending cell index.
        cell: u32,
        /// Width carried by the snapshot.
        width: u32,
    },
}

fn parse_width(width: &str) -> Result<u32, FrameTransferError> {
    let parsed = width
        .trim()
        .parse::<u32>()
        .map_err(|_| FrameTransferError::InvalidWidth(width.to_owned()))?;

    if parsed == 0 {
        return Err(FrameTransferError::InvalidWidth(width.to_owned()));
    }
    if parsed > MAX_RENDER_WIDTH {
        return Err(FrameTransferError::WidthTooLarge {
            width: parsed,
            maximum: MAX_RENDER_WIDTH,
        });
    }

    Ok(parsed)
}
