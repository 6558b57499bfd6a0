//! List numbering reconstruction.
//!
//! Paragraphs governed by a numbering definition carry no visible label in
//! their text. This pass walks the document in order, keeps one counter
//! vector per definition and writes the label back into the paragraph.

use crate::model::{Document, NumberingDefinition, MAX_NUMBERING_LEVELS};
use std::collections::HashMap;

type Counters = [u32; MAX_NUMBERING_LEVELS];

/// Rebuild visible list numbers. Returns the number of labelled paragraphs.
///
/// The counter level is the list level of the paragraph's numbering
/// reference, not its outline level. Paragraphs that already carry a
/// number keep their text, but still advance the counters, so running
/// this twice is harmless.
pub fn restore_numbering(doc: &mut Document) -> usize {
    let Document {
        paragraphs,
        numberings,
        ..
    } = doc;

    let definitions: HashMap<u32, &NumberingDefinition> =
        numberings.iter().map(|n| (n.id, n)).collect();
    let mut counters: HashMap<u32, Counters> = HashMap::new();
    let mut labelled = 0;

    for paragraph in paragraphs.iter_mut() {
        let Some(numbering) = paragraph.style.numbering else {
            continue;
        };
        let Some(definition) = definitions.get(&numbering.id) else {
            log::warn!(
                "paragraph {} references undefined numbering {}",
                paragraph.index,
                numbering.id
            );
            continue;
        };

        let level = numbering.level as usize;
        if level >= definition.levels.len() || level >= MAX_NUMBERING_LEVELS {
            continue;
        }

        let state = counters.entry(numbering.id).or_insert([0; MAX_NUMBERING_LEVELS]);
        advance(state, level);

        if paragraph.number.is_some() {
            continue;
        }

        let label = render_label(definition, state, level);
        paragraph.text = format!("{} {}", label, paragraph.text);
        paragraph.number = Some(label);
        labelled += 1;
    }

    log::debug!("restored {} list numbers", labelled);
    labelled
}

fn advance(state: &mut Counters, level: usize) {
    for counter in state.iter_mut().skip(level + 1) {
        *counter = 0;
    }
    state[level] += 1;
}

fn render_label(definition: &NumberingDefinition, state: &Counters, level: usize) -> String {
    let mut label = definition.levels[level].text.clone();
    for k in 1..=level + 1 {
        let placeholder = format!("%{}", k);
        if !label.contains(&placeholder) {
            continue;
        }
        let style = definition.levels[k - 1].style;
        label = label.replace(&placeholder, &style.format(state[k - 1]));
    }
    label
}
