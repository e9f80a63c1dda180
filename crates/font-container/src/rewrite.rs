//! Table-level rewriting of an encoded font.

use read_fonts::FontRef;
use write_fonts::FontBuilder;

use crate::error::Result;

/// Rewrite font data by applying a transformation function.
///
/// Copies all tables from the source font, then calls `f` to replace or add
/// tables. Tables `f` does not touch keep their original bytes.
pub fn rewrite_font(
    data: &[u8],
    f: impl FnOnce(&FontRef, &mut FontBuilder) -> Result<()>,
) -> Result<Vec<u8>> {
    let font = FontRef::new(data)?;
    let mut builder = FontBuilder::new();

    for record in font.table_directory.table_records() {
        let tag = record.tag();
        if let Some(table_data) = font.table_data(tag) {
            builder.add_raw(tag, table_data);
        }
    }

    f(&font, &mut builder)?;
    Ok(builder.build())
}
