use cinelenz_config::Lexicon;

/// Display-only content cleanup, applied after sentiment labeling so it
/// can never change a label.
///
/// Very short items dominated by denylisted tokens are dropped outright;
/// everything else has denylisted exact phrases and whole-word tokens
/// removed and whitespace collapsed. Applying the pass twice yields the
/// same text as applying it once.
pub fn sanitize(content: &str, lexicon: &Lexicon) -> Option<String> {
    let mut text = content.trim().to_string();
    if should_drop(&text, lexicon) {
        return None;
    }

    // Removing a phrase can splice the surrounding text into a new
    // occurrence of that phrase, so the cleaning pass repeats until it
    // reaches a fixed point. Each pass only ever removes bytes.
    loop {
        let cleaned = clean_once(&text, lexicon);
        if cleaned.is_empty() || should_drop(&cleaned, lexicon) {
            return None;
        }
        if cleaned == text {
            return Some(cleaned);
        }
        text = cleaned;
    }
}

fn clean_once(text: &str, lexicon: &Lexicon) -> String {
    let mut text = text.to_string();
    for phrase in &lexicon.denylist_phrases {
        text = strip_phrase(&text, phrase);
    }
    let kept: Vec<&str> = text
        .split_whitespace()
        .filter(|token| !is_denied_word(token, lexicon))
        .collect();
    kept.join(" ")
}

/// An item is dropped when it has at most three tokens and no more than
/// one of them survives the denylist. Missing text trivially satisfies
/// this.
fn should_drop(content: &str, lexicon: &Lexicon) -> bool {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    if tokens.len() > 3 {
        return false;
    }
    let surviving = tokens
        .iter()
        .filter(|token| !is_denied_word(token, lexicon))
        .count();
    surviving <= 1
}

fn is_denied_word(token: &str, lexicon: &Lexicon) -> bool {
    let bare = token.trim_matches(|c: char| !c.is_alphanumeric());
    lexicon
        .denylist_words
        .iter()
        .any(|word| bare.eq_ignore_ascii_case(word))
}

/// Remove every case-insensitive occurrence of an exact phrase.
///
/// Lowercasing can change byte length ('İ' lowers to an "i" plus a
/// combining dot), so matches found in the lowered copy are mapped back
/// through a byte-offset table instead of indexing the original with
/// lowered positions.
fn strip_phrase(text: &str, phrase: &str) -> String {
    if phrase.is_empty() {
        return text.to_string();
    }
    let mut lowered = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len() + 1);
    for (index, ch) in text.char_indices() {
        for low in ch.to_lowercase() {
            offsets.resize(offsets.len() + low.len_utf8(), index);
            lowered.push(low);
        }
    }
    offsets.push(text.len());
    let lowered_phrase = phrase.to_lowercase();

    let mut result = String::with_capacity(text.len());
    let mut keep_from = 0;
    let mut cursor = 0;
    while let Some(found) = lowered[cursor..].find(&lowered_phrase) {
        let start = cursor + found;
        cursor = start + lowered_phrase.len();
        result.push_str(&text[keep_from..offsets[start]]);
        keep_from = offsets[cursor];
    }
    result.push_str(&text[keep_from..]);
    result
}
