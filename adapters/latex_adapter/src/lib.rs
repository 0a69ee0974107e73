mod images;

pub use images::{CopyingImageResolver, DEFAULT_IMAGES_DIR};

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use fp_core::domain::{Entry, EntryCollection};
use fp_core::error::ConversionError;
use fp_core::ports::{DocumentWriter, ImageResolver, Result};
use fp_core::utils::format_timestamp_to_local;
use log::info;

const PREAMBLE: &[&str] = &[
    r"\documentclass{article}",
    r"\usepackage[T1]{fontenc}",
    r"\usepackage[utf8]{inputenc}",
    r"\usepackage{lmodern}",
    r"\usepackage{textcomp}",
    r"\usepackage{lastpage}",
    r"\usepackage{geometry}",
    r"\geometry{tmargin=2cm,lmargin=2cm,rmargin=2cm}",
    r"\usepackage{wrapfig}",
    r"\usepackage{graphicx}",
    r"\usepackage{sectsty}",
    r"\sectionfont{\fontsize{24}{15}\selectfont}",
    "",
    r"\begin{document}",
    r"\normalsize",
];

const IMAGE_WIDTH: &str = r"0.5\textwidth";

// Pulls the text back up next to the floated image
const FLOAT_ADJUST: &str = "-110pt";

/// LaTeX writer adapter implementation
pub struct LatexWriterAdapter {
    output_base: PathBuf,
    image_resolver: Box<dyn ImageResolver>,
}

impl LatexWriterAdapter {
    /// `output_base` is the document path without its `.tex` extension.
    pub fn new(output_base: impl Into<PathBuf>, image_resolver: Box<dyn ImageResolver>) -> Self {
        Self {
            output_base: output_base.into(),
            image_resolver,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        let mut path = OsString::from(self.output_base.as_os_str());
        path.push(".tex");
        PathBuf::from(path)
    }

    /// Builds the whole document source, resolving each entry's images on the way.
    ///
    /// Entries come out in key order, which is string order.
    pub fn build_document(&self, entries: &EntryCollection) -> Result<String> {
        let mut output = String::new();
        for line in PREAMBLE {
            push_line(&mut output, line);
        }
        for (key, entry) in entries {
            self.format_entry(&mut output, key, entry)?;
        }
        output.push_str("\\end{document}\n");
        Ok(output)
    }

    fn format_entry(&self, output: &mut String, key: &str, entry: &Entry) -> Result<()> {
        info!("Processing {}", entry.title);
        let images = self.image_resolver.resolve(&entry.images)?;

        push_line(output, r"\newpage");
        push_line(output, &format!("\\section*{{{}}}", escape_latex(&entry.title)));
        push_line(output, &format_timestamp_to_local(key)?);
        push_line(output, r"\newline");

        if images.is_empty() {
            push_line(output, r"\newline");
        } else {
            push_line(
                output,
                &format!("\\begin{{wrapfigure}}{{o}}{{{IMAGE_WIDTH}}}"),
            );
            for image in &images {
                push_line(
                    output,
                    &format!("\\includegraphics[width={IMAGE_WIDTH}]{{{image}}}"),
                );
            }
            push_line(output, &format!("\\vspace{{{FLOAT_ADJUST}}}"));
            push_line(output, r"\end{wrapfigure}");
        }

        push_line(output, entry.text.trim());
        Ok(())
    }
}

impl DocumentWriter for LatexWriterAdapter {
    fn write(&self, entries: &EntryCollection) -> Result<PathBuf> {
        let document = self.build_document(entries)?;
        let path = self.output_path();
        fs::write(&path, document).map_err(|e| ConversionError::io(&path, e))?;
        info!("Wrote {} entries to {}", entries.len(), path.display());
        Ok(path)
    }
}

// A trailing `%` keeps the line break out of the typeset text
fn push_line(output: &mut String, line: &str) {
    output.push_str(line);
    output.push_str("%\n");
}

/// Escapes characters that LaTeX treats as commands in plain text.
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '~' => escaped.push_str(r"\textasciitilde{}"),
            '^' => escaped.push_str(r"\^{}"),
            '\\' => escaped.push_str(r"\textbackslash{}"),
            '\n' | '\r' => escaped.push(' '),
            c => escaped.push(c),
        }
    }
    escaped
}
