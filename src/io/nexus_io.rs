//! Reader for the NEXUS subset that carries a presence/absence matrix.
//!
//! Supported: `TAXA` (`DIMENSIONS`, `TAXLABELS`), and `CHARACTERS` or its
//! legacy alias `DATA` (`DIMENSIONS`, `FORMAT`, `CHARLABELS`,
//! `CHARSTATELABELS`, `MATRIX`, sequential or interleaved). Every other
//! block is skipped. NEXUS "taxa" are matrix rows, i.e. areas; NEXUS
//! "characters" are the taxa whose endemism is measured.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::EndemicityError;
use crate::models::{CellState, PresenceMatrix};

#[derive(Debug, Clone, PartialEq)]
struct Token {
    text: String,
    line: usize,
    column: usize,
    quoted: bool,
}

impl Token {
    fn is(&self, keyword: &str) -> bool {
        !self.quoted && self.text.eq_ignore_ascii_case(keyword)
    }
}

fn is_punctuation(c: char) -> bool {
    matches!(c, ';' | '=' | ',' | '/')
}

fn nexus_error(line: usize, column: usize, message: impl Into<String>) -> EndemicityError {
    EndemicityError::Nexus {
        line,
        column,
        message: message.into(),
    }
}

fn tokenize(src: &str) -> Result<Vec<Token>, EndemicityError> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();
    let (mut line, mut column) = (1usize, 1usize);

    macro_rules! bump {
        () => {{
            let c = chars.next();
            match c {
                Some('\n') => {
                    line += 1;
                    column = 1;
                }
                Some(_) => column += 1,
                None => {}
            }
            c
        }};
    }

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            bump!();
            continue;
        }

        let (start_line, start_column) = (line, column);

        if c == '[' {
            bump!();
            let mut depth = 1;
            while depth > 0 {
                match bump!() {
                    Some('[') => depth += 1,
                    Some(']') => depth -= 1,
                    Some(_) => {}
                    None => {
                        return Err(nexus_error(start_line, start_column, "unterminated comment"))
                    }
                }
            }
            continue;
        }

        if is_punctuation(c) {
            bump!();
            tokens.push(Token {
                text: c.to_string(),
                line: start_line,
                column: start_column,
                quoted: false,
            });
            continue;
        }

        if c == '\'' || c == '"' {
            let quote = c;
            bump!();
            let mut text = String::new();
            loop {
                match bump!() {
                    Some(q) if q == quote => {
                        // doubled quote is an escaped literal
                        if chars.peek() == Some(&quote) {
                            bump!();
                            text.push(quote);
                        } else {
                            break;
                        }
                    }
                    Some(other) => text.push(other),
                    None => {
                        return Err(nexus_error(
                            start_line,
                            start_column,
                            "unterminated quoted word",
                        ))
                    }
                }
            }
            tokens.push(Token {
                text,
                line: start_line,
                column: start_column,
                quoted: true,
            });
            continue;
        }

        let mut text = String::new();
        while let Some(&w) = chars.peek() {
            if w.is_whitespace() || is_punctuation(w) || w == '[' || w == '\'' || w == '"' {
                break;
            }
            bump!();
            text.push(if w == '_' { ' ' } else { w });
        }
        tokens.push(Token {
            text,
            line: start_line,
            column: start_column,
            quoted: false,
        });
    }

    Ok(tokens)
}

/// A character label keyed by its 1-based character number.
#[derive(Debug, Clone)]
struct CharLabel {
    number: usize,
    name: String,
    line: usize,
    column: usize,
}

/// Contents of one CHARACTERS or DATA block.
#[derive(Debug, Default)]
struct CharactersBlock {
    ntax: Option<usize>,
    nchar: Option<usize>,
    missing: char,
    gap: char,
    match_char: Option<char>,
    interleave: bool,
    char_labels: Vec<CharLabel>,
    rows: Vec<(String, Vec<char>)>,
    // position of the MATRIX command, for errors raised after parsing
    matrix_at: (usize, usize),
}

impl CharactersBlock {
    fn new() -> Self {
        Self {
            missing: '?',
            gap: '-',
            ..Default::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cell_state(&self, symbol: char) -> CellState {
        if symbol == self.missing || symbol == self.gap {
            CellState::Missing
        } else if symbol == '1' {
            CellState::Present
        } else {
            CellState::Absent
        }
    }
}

#[derive(Debug, Default)]
struct NexusContent {
    ntax: Option<usize>,
    taxon_block_labels: Option<Vec<String>>,
    characters: Option<CharactersBlock>,
    data: Option<CharactersBlock>,
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn end_position(&self) -> (usize, usize) {
        self.tokens
            .last()
            .map(|t| (t.line, t.column + t.text.len()))
            .unwrap_or((1, 1))
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, EndemicityError> {
        match self.tokens.get(self.pos) {
            Some(tok) => {
                self.pos += 1;
                Ok(tok.clone())
            }
            None => {
                let (line, column) = self.end_position();
                Err(nexus_error(line, column, "unexpected end of file"))
            }
        }
    }

    fn expect(&mut self, expected: &str) -> Result<Token, EndemicityError> {
        let tok = self.next()?;
        if tok.is(expected) {
            Ok(tok)
        } else {
            Err(nexus_error(
                tok.line,
                tok.column,
                format!("expected '{expected}', found '{}'", tok.text),
            ))
        }
    }

    fn skip_command(&mut self) -> Result<(), EndemicityError> {
        while !self.next()?.is(";") {}
        Ok(())
    }

    /// Words up to the terminating `;`.
    fn words(&mut self) -> Result<Vec<String>, EndemicityError> {
        let mut words = Vec::new();
        loop {
            let tok = self.next()?;
            if tok.is(";") {
                return Ok(words);
            }
            words.push(tok.text);
        }
    }

    /// `KEY[=VALUE]` pairs up to the terminating `;`. Keys are lowercased.
    fn key_values(&mut self) -> Result<Vec<(Token, Option<Token>)>, EndemicityError> {
        let mut pairs = Vec::new();
        loop {
            let key = self.next()?;
            if key.is(";") {
                return Ok(pairs);
            }
            let value = if self.peek().is_some_and(|t| t.is("=")) {
                self.next()?;
                Some(self.next()?)
            } else {
                None
            };
            pairs.push((key, value));
        }
    }

    fn parse(mut self) -> Result<NexusContent, EndemicityError> {
        let header = self.next()?;
        if !header.is("#NEXUS") {
            return Err(nexus_error(
                header.line,
                header.column,
                "file must start with #NEXUS",
            ));
        }

        let mut content = NexusContent::default();
        while let Some(tok) = self.peek().cloned() {
            self.next()?;
            if !tok.is("begin") {
                return Err(nexus_error(
                    tok.line,
                    tok.column,
                    format!("expected BEGIN, found '{}'", tok.text),
                ));
            }
            let name = self.next()?;
            self.expect(";")?;
            let block = name.text.to_uppercase();

            match block.as_str() {
                "TAXA" => {
                    info!("Reading \"{block}\" block...");
                    self.parse_taxa(&mut content)?;
                }
                "CHARACTERS" | "DATA" => {
                    info!("Reading \"{block}\" block...");
                    let parsed = self.parse_characters()?;
                    let slot = if block == "DATA" {
                        &mut content.data
                    } else {
                        &mut content.characters
                    };
                    if slot.as_ref().is_some_and(|b| !b.is_empty()) {
                        warn!("Ignoring repeated {block} block at line {}", name.line);
                    } else {
                        *slot = Some(parsed);
                    }
                }
                _ => {
                    info!("Skipping unknown block ({block})...");
                    self.skip_block()?;
                    continue;
                }
            }
            info!("Finished with {block} block.");
        }
        Ok(content)
    }

    fn at_block_end(&mut self, tok: &Token) -> Result<bool, EndemicityError> {
        if tok.is("end") || tok.is("endblock") {
            self.expect(";")?;
            return Ok(true);
        }
        Ok(false)
    }

    fn skip_block(&mut self) -> Result<(), EndemicityError> {
        loop {
            let tok = self.next()?;
            if self.at_block_end(&tok)? {
                return Ok(());
            }
            if !tok.is(";") {
                self.skip_command()?;
            }
        }
    }

    fn parse_count(tok: &Token, value: Option<Token>) -> Result<usize, EndemicityError> {
        let value = value.ok_or_else(|| {
            nexus_error(tok.line, tok.column, format!("{} needs a value", tok.text))
        })?;
        value.text.parse().map_err(|_| {
            nexus_error(
                value.line,
                value.column,
                format!("invalid {} value '{}'", tok.text.to_uppercase(), value.text),
            )
        })
    }

    fn parse_taxa(&mut self, content: &mut NexusContent) -> Result<(), EndemicityError> {
        loop {
            let cmd = self.next()?;
            if self.at_block_end(&cmd)? {
                return Ok(());
            }
            if cmd.is("dimensions") {
                for (key, value) in self.key_values()? {
                    if key.is("ntax") {
                        content.ntax = Some(Self::parse_count(&key, value)?);
                    }
                }
            } else if cmd.is("taxlabels") {
                let labels = self.words()?;
                if let Some(ntax) = content.ntax {
                    if labels.len() != ntax {
                        return Err(nexus_error(
                            cmd.line,
                            cmd.column,
                            format!("TAXLABELS lists {} taxa, NTAX is {ntax}", labels.len()),
                        ));
                    }
                }
                content.taxon_block_labels = Some(labels);
            } else if !cmd.is(";") {
                debug!("skipping TAXA command {}", cmd.text);
                self.skip_command()?;
            }
        }
    }

    fn parse_characters(&mut self) -> Result<CharactersBlock, EndemicityError> {
        let mut block = CharactersBlock::new();
        loop {
            let cmd = self.next()?;
            if self.at_block_end(&cmd)? {
                return Ok(block);
            }
            if cmd.is("dimensions") {
                for (key, value) in self.key_values()? {
                    if key.is("ntax") {
                        block.ntax = Some(Self::parse_count(&key, value)?);
                    } else if key.is("nchar") {
                        block.nchar = Some(Self::parse_count(&key, value)?);
                    }
                }
            } else if cmd.is("format") {
                self.parse_format(&mut block)?;
            } else if cmd.is("charlabels") {
                block.char_labels = self.parse_charlabels()?;
            } else if cmd.is("charstatelabels") {
                block.char_labels = self.parse_charstatelabels()?;
            } else if cmd.is("matrix") {
                block.matrix_at = (cmd.line, cmd.column);
                self.parse_matrix(&mut block, &cmd)?;
            } else if !cmd.is(";") {
                debug!("skipping CHARACTERS command {}", cmd.text);
                self.skip_command()?;
            }
        }
    }

    fn parse_format(&mut self, block: &mut CharactersBlock) -> Result<(), EndemicityError> {
        let symbol = |key: &Token, value: Option<Token>| -> Result<char, EndemicityError> {
            value
                .and_then(|v| v.text.chars().next())
                .ok_or_else(|| nexus_error(key.line, key.column, format!("{} needs a symbol", key.text)))
        };

        for (key, value) in self.key_values()? {
            if key.is("missing") {
                block.missing = symbol(&key, value)?;
            } else if key.is("gap") {
                block.gap = symbol(&key, value)?;
            } else if key.is("matchchar") {
                block.match_char = Some(symbol(&key, value)?);
            } else if key.is("interleave") {
                block.interleave = value.map_or(true, |v| !v.is("no"));
            } else if key.is("datatype") {
                if let Some(v) = value.filter(|v| !v.is("standard")) {
                    warn!("DATATYPE={} read as presence/absence; only '1' counts as present", v.text);
                }
            } else {
                debug!("ignoring FORMAT subcommand {}", key.text);
            }
        }
        Ok(())
    }

    fn parse_charlabels(&mut self) -> Result<Vec<CharLabel>, EndemicityError> {
        let mut labels = Vec::new();
        loop {
            let tok = self.next()?;
            if tok.is(";") {
                return Ok(labels);
            }
            labels.push(CharLabel {
                number: labels.len() + 1,
                name: tok.text,
                line: tok.line,
                column: tok.column,
            });
        }
    }

    /// Labels are kept sparse; numbers are checked against NCHAR once the
    /// matrix is built, since DIMENSIONS may follow this command.
    fn parse_charstatelabels(&mut self) -> Result<Vec<CharLabel>, EndemicityError> {
        let mut labels = Vec::new();
        loop {
            let number = self.next()?;
            if number.is(";") {
                return Ok(labels);
            }
            let index: usize = number
                .text
                .parse()
                .ok()
                .filter(|&n| n >= 1)
                .ok_or_else(|| {
                    nexus_error(
                        number.line,
                        number.column,
                        format!("invalid character number '{}'", number.text),
                    )
                })?;

            let mut name = None;
            let mut in_states = false;
            loop {
                let tok = self.next()?;
                if tok.is(",") {
                    break;
                }
                if tok.is(";") {
                    // let the outer loop see the terminator
                    self.pos -= 1;
                    break;
                }
                if tok.is("/") {
                    in_states = true;
                } else if !in_states && name.is_none() {
                    name = Some(tok.text);
                }
            }

            labels.push(CharLabel {
                number: index,
                name: name.unwrap_or_default(),
                line: number.line,
                column: number.column,
            });
        }
    }

    fn parse_matrix(
        &mut self,
        block: &mut CharactersBlock,
        cmd: &Token,
    ) -> Result<(), EndemicityError> {
        let nchar = block.nchar.ok_or_else(|| {
            nexus_error(cmd.line, cmd.column, "MATRIX appears before DIMENSIONS NCHAR")
        })?;

        loop {
            let label = self.next()?;
            if label.is(";") {
                break;
            }

            let existing = if block.interleave {
                block.rows.iter().position(|(l, _)| *l == label.text)
            } else {
                None
            };
            let idx = match existing {
                Some(i) => i,
                None => {
                    block.rows.push((label.text.clone(), Vec::with_capacity(nchar)));
                    block.rows.len() - 1
                }
            };

            loop {
                let row = &mut block.rows[idx].1;
                if !block.interleave && row.len() >= nchar {
                    break;
                }
                match self.peek() {
                    None => {
                        let (line, column) = self.end_position();
                        return Err(nexus_error(line, column, "unterminated MATRIX"));
                    }
                    Some(t) if t.is(";") => break,
                    Some(t) if block.interleave && t.line != label.line => break,
                    Some(_) => {}
                }
                let tok = self.next()?;
                push_symbols(&tok, row)?;
                if row.len() > nchar {
                    return Err(nexus_error(
                        tok.line,
                        tok.column,
                        format!("row '{}' has more than {nchar} states", label.text),
                    ));
                }
            }

            let len = block.rows[idx].1.len();
            if !block.interleave && len != nchar {
                return Err(nexus_error(
                    label.line,
                    label.column,
                    format!("row '{}' has {len} states, expected {nchar}", label.text),
                ));
            }
        }

        if block.interleave {
            if let Some((label, row)) = block.rows.iter().find(|(_, r)| r.len() != nchar) {
                return Err(nexus_error(
                    cmd.line,
                    cmd.column,
                    format!("row '{label}' has {} states, expected {nchar}", row.len()),
                ));
            }
        }
        Ok(())
    }
}

/// Expand a matrix word into state symbols; `(01)` and `{01}` keep their first state.
fn push_symbols(tok: &Token, row: &mut Vec<char>) -> Result<(), EndemicityError> {
    let mut chars = tok.text.chars();
    while let Some(c) = chars.next() {
        let close = match c {
            '(' => ')',
            '{' => '}',
            _ => {
                row.push(c);
                continue;
            }
        };
        let first = chars.next().filter(|&s| s != close);
        let closed = first.is_some() && chars.by_ref().any(|s| s == close);
        match (first, closed) {
            (Some(state), true) => row.push(state),
            _ => {
                return Err(nexus_error(
                    tok.line,
                    tok.column,
                    format!("malformed polymorphism in '{}'", tok.text),
                ))
            }
        }
    }
    Ok(())
}

fn build_matrix(content: NexusContent, name: &str) -> Result<PresenceMatrix, EndemicityError> {
    let NexusContent {
        ntax,
        taxon_block_labels,
        characters,
        data,
    } = content;

    let block = characters
        .filter(|b| !b.is_empty())
        .or(data.filter(|b| !b.is_empty()))
        .ok_or_else(|| nexus_error(1, 1, "no CHARACTERS or DATA block with a MATRIX"))?;
    let (line, column) = block.matrix_at;
    let nchar = block.nchar.unwrap_or(0);

    let area_labels: Vec<String> = match taxon_block_labels {
        Some(labels) => labels,
        None => block.rows.iter().map(|(l, _)| l.clone()).collect(),
    };
    if let Some(expected) = block.ntax.or(ntax) {
        if block.rows.len() != expected {
            return Err(nexus_error(
                line,
                column,
                format!("MATRIX has {} rows, NTAX is {expected}", block.rows.len()),
            ));
        }
    }

    // rows may be keyed by label or by 1-based taxon number
    let mut ordered: Vec<Option<&Vec<char>>> = vec![None; area_labels.len()];
    for (label, row) in &block.rows {
        let slot = area_labels
            .iter()
            .position(|l| l == label)
            .or_else(|| {
                label
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=area_labels.len()).contains(n))
                    .map(|n| n - 1)
            })
            .ok_or_else(|| nexus_error(line, column, format!("unknown taxon '{label}' in MATRIX")))?;
        if ordered[slot].replace(row).is_some() {
            return Err(nexus_error(line, column, format!("duplicate MATRIX row '{label}'")));
        }
    }

    let reference = block.rows.first().map(|(_, r)| r.clone()).unwrap_or_default();
    let mut unexpected = 0usize;
    let mut rows = Vec::with_capacity(area_labels.len());
    for (label, row) in area_labels.iter().zip(&ordered) {
        let row = row.ok_or_else(|| nexus_error(line, column, format!("no MATRIX row for '{label}'")))?;
        let states = row
            .iter()
            .enumerate()
            .map(|(j, &symbol)| {
                let symbol = match block.match_char {
                    Some(m) if symbol == m => reference[j],
                    _ => symbol,
                };
                if !matches!(symbol, '0' | '1') && symbol != block.missing && symbol != block.gap {
                    unexpected += 1;
                }
                block.cell_state(symbol)
            })
            .collect();
        rows.push(states);
    }
    if unexpected > 0 {
        warn!("{unexpected} cells hold symbols other than 0/1/missing/gap and were read as absent");
    }

    let mut taxon_labels = vec![String::new(); nchar];
    for label in block.char_labels {
        if label.number > nchar {
            return Err(nexus_error(
                label.line,
                label.column,
                format!("character number {} exceeds NCHAR={nchar}", label.number),
            ));
        }
        taxon_labels[label.number - 1] = label.name;
    }
    for (i, label) in taxon_labels.iter_mut().enumerate() {
        if label.is_empty() {
            *label = (i + 1).to_string();
        }
    }

    let matrix = PresenceMatrix::new(area_labels, taxon_labels, rows)?.with_name(name);
    info!(
        "Data matrix stored: {} areas x {} taxa",
        matrix.area_count(),
        matrix.taxon_count()
    );
    Ok(matrix)
}

/// Parse NEXUS text into a presence matrix.
pub fn read_nexus_from_str(src: &str, name: &str) -> Result<PresenceMatrix, EndemicityError> {
    let content = Parser::new(tokenize(src)?).parse()?;
    build_matrix(content, name)
}

/// Read a presence matrix from a NEXUS file.
pub fn read_nexus(path: impl AsRef<Path>) -> Result<PresenceMatrix, EndemicityError> {
    let path = path.as_ref();
    info!("Opening input data file {}", path.display());
    let src = std::fs::read_to_string(path)?;
    read_nexus_from_str(
        &src,
        &path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string()),
    )
}

/// Read a presence matrix from NEXUS bytes.
pub fn read_nexus_from_bytes(data: &[u8], name: &str) -> Result<PresenceMatrix, EndemicityError> {
    let src = std::str::from_utf8(data)
        .map_err(|e| EndemicityError::ParseError(format!("Invalid UTF-8: {e}")))?;
    read_nexus_from_str(src, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellState::{Absent as A, Missing as M, Present as P};

    const REFERENCE: &str = "#NEXUS
[ three areas, four taxa ]
BEGIN TAXA;
    DIMENSIONS NTAX=3;
    TAXLABELS A1 A2 A3;
END;

BEGIN CHARACTERS;
    DIMENSIONS NCHAR=4;
    FORMAT SYMBOLS=\"01\" MISSING=?;
    CHARLABELS t1 t2 t3 t4;
    MATRIX
        A1 1101
        A2 1001
        A3 0001
    ;
END;
";

    #[test]
    fn test_tokenize_words_and_punctuation() {
        let tokens = tokenize("DIMENSIONS NTAX=3;").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["DIMENSIONS", "NTAX", "=", "3", ";"]);
        assert_eq!(tokens[3].column, 17);
    }

    #[test]
    fn test_tokenize_comments_quotes_underscores() {
        let tokens = tokenize("[a [nested] comment] 'Rio''s Basin' Mata_Atlantica").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "Rio's Basin");
        assert!(tokens[0].quoted);
        assert_eq!(tokens[1].text, "Mata Atlantica");
    }

    #[test]
    fn test_tokenize_tracks_lines() {
        let tokens = tokenize("#NEXUS\n\n  BEGIN").unwrap();
        assert_eq!((tokens[1].line, tokens[1].column), (3, 3));
    }

    #[test]
    fn test_tokenize_unterminated_comment() {
        let err = tokenize("#NEXUS [never closed").unwrap_err();
        assert!(matches!(err, EndemicityError::Nexus { line: 1, column: 8, .. }));
    }

    #[test]
    fn test_reference_matrix() {
        let m = read_nexus_from_str(REFERENCE, "ref").unwrap();
        assert_eq!(m.area_labels(), &["A1", "A2", "A3"]);
        assert_eq!(m.taxon_labels(), &["t1", "t2", "t3", "t4"]);
        assert_eq!(m.row(0), &[P, P, A, P]);
        assert_eq!(m.row(1), &[P, A, A, P]);
        assert_eq!(m.row(2), &[A, A, A, P]);
        assert_eq!(m.name(), "ref");
    }

    #[test]
    fn test_data_block_without_taxa_block() {
        let src = "#NEXUS
BEGIN DATA;
    DIMENSIONS NTAX=2 NCHAR=3;
    FORMAT MISSING=? GAP=-;
    MATRIX
        'North Coast' 1?0
        South         -11
    ;
END;";
        let m = read_nexus_from_str(src, "data").unwrap();
        assert_eq!(m.area_labels(), &["North Coast", "South"]);
        assert_eq!(m.taxon_labels(), &["1", "2", "3"]);
        assert_eq!(m.row(0), &[P, M, A]);
        assert_eq!(m.row(1), &[M, P, P]);
    }

    #[test]
    fn test_characters_preferred_over_data() {
        let src = "#NEXUS
BEGIN DATA; DIMENSIONS NTAX=1 NCHAR=1; MATRIX x 0; END;
BEGIN CHARACTERS; DIMENSIONS NTAX=1 NCHAR=1; MATRIX y 1; END;";
        let m = read_nexus_from_str(src, "both").unwrap();
        assert_eq!(m.area_labels(), &["y"]);
        assert_eq!(m.row(0), &[P]);
    }

    #[test]
    fn test_charstatelabels() {
        let src = "#NEXUS
BEGIN CHARACTERS;
    DIMENSIONS NTAX=1 NCHAR=3;
    CHARSTATELABELS 1 Bothrops_jararaca / absent present, 3 'Bufo crucifer';
    MATRIX a1 111;
END;";
        let m = read_nexus_from_str(src, "csl").unwrap();
        assert_eq!(m.taxon_labels(), &["Bothrops jararaca", "2", "Bufo crucifer"]);
    }

    #[test]
    fn test_charstatelabels_before_dimensions() {
        let src = "#NEXUS
BEGIN CHARACTERS;
    CHARSTATELABELS 2 Bufo_crucifer;
    DIMENSIONS NTAX=1 NCHAR=2;
    MATRIX a1 10;
END;";
        let m = read_nexus_from_str(src, "late").unwrap();
        assert_eq!(m.taxon_labels(), &["1", "Bufo crucifer"]);
    }

    #[test]
    fn test_charstatelabels_number_beyond_nchar() {
        for number in ["4", "1000000000", "18446744073709551615"] {
            let src = format!(
                "#NEXUS
BEGIN CHARACTERS;
    CHARSTATELABELS {number} x;
    DIMENSIONS NTAX=1 NCHAR=1;
    MATRIX a 1;
END;"
            );
            let err = read_nexus_from_str(&src, "big").unwrap_err();
            assert!(
                matches!(err, EndemicityError::Nexus { line: 3, .. }),
                "{number}: {err}"
            );
        }
    }

    #[test]
    fn test_charlabels_beyond_nchar() {
        let src = "#NEXUS
BEGIN CHARACTERS;
    DIMENSIONS NTAX=1 NCHAR=1;
    CHARLABELS t1 t2;
    MATRIX a 1;
END;";
        assert!(matches!(
            read_nexus_from_str(src, "extra"),
            Err(EndemicityError::Nexus { line: 4, .. })
        ));
    }

    #[test]
    fn test_states_split_across_words_and_polymorphism() {
        let src = "#NEXUS
BEGIN CHARACTERS;
    DIMENSIONS NTAX=1 NCHAR=5;
    MATRIX a1 1 0 (10) {01}1;
END;";
        let m = read_nexus_from_str(src, "poly").unwrap();
        assert_eq!(m.row(0), &[P, A, P, A, P]);
    }

    #[test]
    fn test_custom_missing_symbol() {
        let src = "#NEXUS
BEGIN CHARACTERS;
    DIMENSIONS NTAX=1 NCHAR=3;
    FORMAT MISSING=N;
    MATRIX a1 1N?;
END;";
        let m = read_nexus_from_str(src, "n").unwrap();
        assert_eq!(m.row(0), &[P, M, A]);
    }

    #[test]
    fn test_matchchar() {
        let src = "#NEXUS
BEGIN CHARACTERS;
    DIMENSIONS NTAX=2 NCHAR=3;
    FORMAT MATCHCHAR=.;
    MATRIX
        a1 101
        a2 .1.
    ;
END;";
        let m = read_nexus_from_str(src, "match").unwrap();
        assert_eq!(m.row(1), &[P, P, P]);
    }

    #[test]
    fn test_interleaved_matrix() {
        let src = "#NEXUS
BEGIN CHARACTERS;
    DIMENSIONS NTAX=2 NCHAR=4;
    FORMAT INTERLEAVE;
    MATRIX
        a1 10
        a2 01
        a1 11
        a2 00
    ;
END;";
        let m = read_nexus_from_str(src, "inter").unwrap();
        assert_eq!(m.row(0), &[P, A, P, P]);
        assert_eq!(m.row(1), &[A, P, A, A]);
    }

    #[test]
    fn test_rows_matched_to_taxa_block_order() {
        let src = "#NEXUS
BEGIN TAXA; DIMENSIONS NTAX=2; TAXLABELS East West; END;
BEGIN CHARACTERS; DIMENSIONS NCHAR=2; MATRIX West 11 East 00; END;";
        let m = read_nexus_from_str(src, "order").unwrap();
        assert_eq!(m.area_labels(), &["East", "West"]);
        assert_eq!(m.row(0), &[A, A]);
        assert_eq!(m.row(1), &[P, P]);
    }

    #[test]
    fn test_unknown_blocks_skipped() {
        let src = "#NEXUS
BEGIN TREES; TREE t1 = ((a,b),c); END;
BEGIN ASSUMPTIONS; OPTIONS DEFTYPE=unord; END;
BEGIN CHARACTERS; DIMENSIONS NTAX=1 NCHAR=1; MATRIX a 1; END;";
        let m = read_nexus_from_str(src, "skip").unwrap();
        assert_eq!(m.taxon_count(), 1);
    }

    #[test]
    fn test_missing_header() {
        let err = read_nexus_from_str("BEGIN DATA; END;", "x").unwrap_err();
        assert!(matches!(err, EndemicityError::Nexus { line: 1, column: 1, .. }));
    }

    #[test]
    fn test_short_row_reports_line() {
        let src = "#NEXUS
BEGIN CHARACTERS;
    DIMENSIONS NTAX=2 NCHAR=3;
    MATRIX
        a1 101
        a2 10
    ;
END;";
        let err = read_nexus_from_str(src, "short").unwrap_err();
        assert!(matches!(err, EndemicityError::Nexus { line: 6, .. }));
    }

    #[test]
    fn test_long_row_rejected() {
        let src = "#NEXUS
BEGIN CHARACTERS; DIMENSIONS NTAX=1 NCHAR=2; MATRIX a1 101; END;";
        assert!(read_nexus_from_str(src, "long").is_err());
    }

    #[test]
    fn test_ntax_mismatch() {
        let src = "#NEXUS
BEGIN CHARACTERS; DIMENSIONS NTAX=3 NCHAR=1; MATRIX a 1 b 0; END;";
        let err = read_nexus_from_str(src, "ntax").unwrap_err();
        assert!(err.to_string().contains("NTAX is 3"));
    }

    #[test]
    fn test_matrix_before_dimensions() {
        let src = "#NEXUS
BEGIN CHARACTERS; MATRIX a 1; END;";
        let err = read_nexus_from_str(src, "dims").unwrap_err();
        assert!(err.to_string().contains("DIMENSIONS NCHAR"));
    }

    #[test]
    fn test_no_matrix_block() {
        let err = read_nexus_from_str("#NEXUS\nBEGIN TAXA; DIMENSIONS NTAX=1; TAXLABELS a; END;", "none")
            .unwrap_err();
        assert!(err.to_string().contains("no CHARACTERS or DATA block"));
    }

    #[test]
    fn test_unterminated_block() {
        let err = read_nexus_from_str("#NEXUS\nBEGIN CHARACTERS; DIMENSIONS NCHAR=1;", "eof")
            .unwrap_err();
        assert!(err.to_string().contains("unexpected end of file"));
    }

    #[test]
    fn test_read_nexus_file_uses_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("islands.nex");
        std::fs::write(&path, REFERENCE).unwrap();
        let m = read_nexus(&path).unwrap();
        assert_eq!(m.name(), "islands");
        assert_eq!(m.present_cell_count(), 6);
    }
}
