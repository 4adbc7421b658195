use crate::AivError;
use crate::AivResult;

/// A single recorded edit, addressed in original-text byte offsets.
#[derive(Debug, Clone)]
struct Edit {
	start: usize,
	end: usize,
	text: String,
}

/// A text buffer supporting indexed insertion and indexed range replacement.
///
/// Every offset is a byte offset into the *original* text, so edit spans can
/// be collected from one immutable scan and recorded in any order. Earlier
/// edits never shift the positions of later ones. The edited text is
/// produced by [`AssetBuffer::to_text`], which applies the recorded edits in
/// ascending original offset. An insertion at a replacement's start offset
/// applies before the replacement; edits with identical spans apply in
/// recording order.
///
/// Insertions are zero-width edits and may share offsets freely; replacement
/// ranges must stay disjoint from every other edit and are rejected when
/// recorded otherwise.
#[derive(Debug, Clone)]
pub struct AssetBuffer {
	original: String,
	edits: Vec<Edit>,
}

impl AssetBuffer {
	pub fn new(original: impl Into<String>) -> Self {
		Self {
			original: original.into(),
			edits: Vec::new(),
		}
	}

	/// The unmodified text all edit offsets refer to.
	pub fn original(&self) -> &str {
		&self.original
	}

	/// Returns true once any edit has been recorded.
	pub fn is_modified(&self) -> bool {
		!self.edits.is_empty()
	}

	/// Record an insertion at `offset`. Existing content is preserved and
	/// shifted, never overwritten.
	pub fn insert(&mut self, offset: usize, text: impl Into<String>) -> AivResult<()> {
		self.record(Edit {
			start: offset,
			end: offset,
			text: text.into(),
		})
	}

	/// Record a replacement of the original range `[start, end)` with `text`.
	pub fn replace(&mut self, start: usize, end: usize, text: impl Into<String>) -> AivResult<()> {
		self.record(Edit {
			start,
			end,
			text: text.into(),
		})
	}

	fn record(&mut self, edit: Edit) -> AivResult<()> {
		let valid = edit.start <= edit.end
			&& edit.end <= self.original.len()
			&& self.original.is_char_boundary(edit.start)
			&& self.original.is_char_boundary(edit.end);
		if !valid {
			return Err(AivError::InvalidEditRange {
				start: edit.start,
				end: edit.end,
			});
		}

		if self.edits.iter().any(|existing| overlaps(existing, &edit)) {
			return Err(AivError::OverlappingEdit {
				start: edit.start,
				end: edit.end,
			});
		}

		self.edits.push(edit);
		Ok(())
	}

	/// Serialize the original text with all recorded edits applied.
	pub fn to_text(&self) -> String {
		let mut ordered: Vec<&Edit> = self.edits.iter().collect();
		// Zero-width edits sort before a replacement starting at the same
		// offset, keeping the splice cursor monotone.
		ordered.sort_by_key(|edit| (edit.start, edit.end));

		let mut output = String::with_capacity(self.original.len());
		let mut cursor = 0;
		for edit in ordered {
			output.push_str(&self.original[cursor..edit.start]);
			output.push_str(&edit.text);
			cursor = edit.end;
		}
		output.push_str(&self.original[cursor..]);

		output
	}
}

/// Half-open range overlap. Zero-width edits at a shared boundary do not
/// overlap anything.
fn overlaps(a: &Edit, b: &Edit) -> bool {
	a.start < b.end && b.start < a.end
}
