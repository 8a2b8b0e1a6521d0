//! Reading and writing triple sets in concrete RDF syntaxes.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use oxrdf::{Graph, Triple};
use oxrdfio::{RdfFormat, RdfParser, RdfSerializer};

use crate::{vocab, DqvError, Result};

/// Resolve a format from a file extension or short name (`ttl`, `nt`, `rdf`, ...).
pub fn format_from_name(name: &str) -> Option<RdfFormat> {
    let name = name.trim().trim_start_matches('.').to_ascii_lowercase();
    match name.as_str() {
        "turtle" => Some(RdfFormat::Turtle),
        "ntriples" | "n-triples" => Some(RdfFormat::NTriples),
        "xml" | "rdfxml" | "rdf/xml" => Some(RdfFormat::RdfXml),
        other => RdfFormat::from_extension(other),
    }
}

/// Parse every triple of `reader` into a graph. Named graphs are flattened.
pub fn parse_graph(reader: impl Read, format: RdfFormat) -> Result<Graph> {
    let mut graph = Graph::new();
    for quad in RdfParser::from_format(format).for_reader(reader) {
        let quad = quad.map_err(|e| DqvError::Parse(e.to_string()))?;
        graph.insert(&Triple::new(quad.subject, quad.predicate, quad.object));
    }
    Ok(graph)
}

pub fn read_graph(path: &Path, format: RdfFormat) -> Result<Graph> {
    let file = File::open(path).map_err(|e| DqvError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_graph(BufReader::new(file), format)
}

/// Write `graph` to `path`, with the quality-vocabulary prefixes where the
/// syntax supports them.
pub fn write_graph(graph: &Graph, path: &Path, format: RdfFormat) -> Result<()> {
    let ser_err = |reason: String| DqvError::Serialization {
        path: path.to_path_buf(),
        reason,
    };

    let mut serializer = RdfSerializer::from_format(format);
    for (prefix, iri) in vocab::PREFIXES {
        serializer = serializer
            .with_prefix(prefix, iri)
            .map_err(|e| ser_err(e.to_string()))?;
    }

    let file = File::create(path).map_err(|e| ser_err(e.to_string()))?;
    let mut writer = serializer.for_writer(BufWriter::new(file));
    for triple in graph.iter() {
        writer.serialize_triple(triple).map_err(|e| ser_err(e.to_string()))?;
    }
    writer
        .finish()
        .and_then(|mut w| w.flush())
        .map_err(|e| ser_err(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_name() {
        assert_eq!(format_from_name("ttl"), Some(RdfFormat::Turtle));
        assert_eq!(format_from_name(".TTL"), Some(RdfFormat::Turtle));
        assert_eq!(format_from_name("turtle"), Some(RdfFormat::Turtle));
        assert_eq!(format_from_name("nt"), Some(RdfFormat::NTriples));
        assert_eq!(format_from_name("xml"), Some(RdfFormat::RdfXml));
        assert_eq!(format_from_name("docx"), None);
    }

    #[test]
    fn test_parse_invalid_turtle() {
        let err = parse_graph("<a> <b> .".as_bytes(), RdfFormat::Turtle).unwrap_err();
        assert!(matches!(err, DqvError::Parse(_)));
    }
}
