pub mod abstracts;
pub mod author_normalizer;
pub mod author_parser;
pub mod bibliography;
pub mod compiler;
pub mod fix_overlay;
pub mod identifier;
pub mod latex_writer;
pub mod ordering;
pub mod pagination;
pub mod pdf_info;
pub mod pdf_locator;
pub mod snapshot;
pub mod transliteration;

pub use author_normalizer::AuthorNormalizer;
pub use compiler::LatexCompiler;
pub use fix_overlay::{FixField, FixTable};
pub use identifier::{IdentifierAssigner, SuffixStyle};
pub use pdf_info::PdfInspector;
pub use transliteration::{AsciiFolder, Transliterator};
