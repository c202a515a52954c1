//! General-purpose sentiment lexicon.
//!
//! Valences use a `-4.0..=4.0` scale. Entries are lowercase single words.
//! Review vocabulary is covered in English and Russian since the default
//! source site is Russian-language; inflected Russian forms are listed
//! explicitly because no stemming is done.

pub(crate) const VALENCES: &[(&str, f64)] = &[
    // Positive (English)
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("fantastic", 2.6),
    ("wonderful", 2.7),
    ("perfect", 2.7),
    ("best", 3.2),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("delicious", 2.7),
    ("tasty", 2.0),
    ("friendly", 2.2),
    ("cozy", 1.9),
    ("cosy", 1.9),
    ("pleasant", 2.3),
    ("beautiful", 2.9),
    ("happy", 2.7),
    ("fun", 2.3),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("recommend", 1.5),
    ("recommended", 1.5),
    ("cool", 1.3),
    ("clean", 1.7),
    ("fresh", 1.3),
    ("ok", 1.2),
    ("okay", 0.9),
    ("fine", 0.8),
    ("atmospheric", 1.2),
    ("welcoming", 1.9),
    ("attentive", 1.5),
    ("polite", 1.8),
    ("fast", 0.6),
    ("cheap", 0.3),
    ("thanks", 1.9),
    ("thank", 1.5),
    // Negative (English)
    ("bad", -2.5),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("worst", -3.1),
    ("worse", -2.1),
    ("rude", -2.0),
    ("dirty", -1.9),
    ("disgusting", -2.4),
    ("disappointing", -2.2),
    ("disappointed", -1.9),
    ("poor", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("boring", -1.3),
    ("noisy", -0.7),
    ("loud", -0.3),
    ("slow", -0.9),
    ("overpriced", -1.6),
    ("expensive", -0.7),
    ("mediocre", -1.0),
    ("annoying", -1.7),
    ("ugly", -3.1),
    ("sad", -2.1),
    ("problem", -1.7),
    ("cold", -0.3),
    ("stale", -1.4),
    ("smelly", -1.3),
    // Positive (Russian)
    ("хороший", 1.9),
    ("хорошая", 1.9),
    ("хорошее", 1.9),
    ("хорошие", 1.9),
    ("хорошо", 1.9),
    ("отличный", 2.7),
    ("отличная", 2.7),
    ("отличное", 2.7),
    ("отличные", 2.7),
    ("отлично", 2.7),
    ("прекрасный", 2.8),
    ("прекрасная", 2.8),
    ("прекрасное", 2.8),
    ("прекрасно", 2.8),
    ("замечательный", 2.7),
    ("замечательная", 2.7),
    ("замечательное", 2.7),
    ("замечательно", 2.7),
    ("великолепный", 3.0),
    ("великолепно", 3.0),
    ("лучший", 3.2),
    ("лучшая", 3.2),
    ("лучшее", 3.2),
    ("лучшие", 3.2),
    ("вкусный", 2.7),
    ("вкусная", 2.7),
    ("вкусное", 2.7),
    ("вкусные", 2.7),
    ("вкусно", 2.7),
    ("уютный", 1.9),
    ("уютная", 1.9),
    ("уютное", 1.9),
    ("уютно", 1.9),
    ("приятный", 2.3),
    ("приятная", 2.3),
    ("приятное", 2.3),
    ("приятные", 2.3),
    ("приятно", 2.3),
    ("дружелюбный", 2.2),
    ("вежливый", 1.8),
    ("вежливые", 1.8),
    ("внимательный", 1.5),
    ("внимательные", 1.5),
    ("рекомендую", 1.5),
    ("советую", 1.5),
    ("понравилось", 2.0),
    ("понравился", 2.0),
    ("понравилась", 2.0),
    ("люблю", 3.2),
    ("супер", 2.9),
    ("класс", 2.0),
    ("спасибо", 1.9),
    ("атмосферно", 1.2),
    ("атмосферный", 1.2),
    ("чисто", 1.7),
    ("быстро", 0.6),
    // Negative (Russian)
    ("плохой", -2.5),
    ("плохая", -2.5),
    ("плохое", -2.5),
    ("плохие", -2.5),
    ("плохо", -2.5),
    ("ужасный", -2.5),
    ("ужасная", -2.5),
    ("ужасное", -2.5),
    ("ужасно", -2.5),
    ("отвратительный", -2.4),
    ("отвратительное", -2.4),
    ("отвратительно", -2.4),
    ("худший", -3.1),
    ("худшее", -3.1),
    ("невкусно", -2.0),
    ("невкусный", -2.0),
    ("грязно", -1.9),
    ("грязный", -1.9),
    ("грубый", -2.0),
    ("грубые", -2.0),
    ("грубо", -2.0),
    ("хамство", -2.6),
    ("хамы", -2.6),
    ("разочарован", -1.9),
    ("разочарована", -1.9),
    ("разочарование", -2.2),
    ("скучно", -1.3),
    ("шумно", -0.7),
    ("долго", -0.9),
    ("дорого", -0.7),
    ("медленно", -0.9),
    ("кошмар", -2.8),
    ("жаль", -1.2),
];

/// Intensity modifiers. Positive entries amplify the following sentiment
/// word, negative entries dampen it.
pub(crate) const BOOSTERS: &[(&str, f64)] = &[
    ("very", 0.293),
    ("really", 0.293),
    ("extremely", 0.293),
    ("absolutely", 0.293),
    ("incredibly", 0.293),
    ("totally", 0.293),
    ("truly", 0.293),
    ("highly", 0.293),
    ("so", 0.293),
    ("super", 0.293),
    ("most", 0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
    ("barely", -0.293),
    ("hardly", -0.293),
    ("kinda", -0.293),
    ("marginally", -0.293),
    ("partly", -0.293),
    ("очень", 0.293),
    ("весьма", 0.293),
    ("крайне", 0.293),
    ("невероятно", 0.293),
    ("абсолютно", 0.293),
    ("действительно", 0.293),
    ("просто", 0.293),
    ("слегка", -0.293),
    ("немного", -0.293),
    ("чуть", -0.293),
    ("довольно", -0.293),
];

pub(crate) const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "neither", "none", "nothing", "nobody", "nowhere", "without",
    "cannot", "cant", "dont", "doesnt", "didnt", "isnt", "wasnt", "arent", "werent", "wont",
    "wouldnt", "shouldnt", "couldnt", "не", "ни", "нет", "без", "никогда",
];

/// Words that shift emphasis onto the clause that follows them.
pub(crate) const CONTRASTS: &[&str] = &["but", "however", "но", "однако"];

pub(crate) fn valence(word: &str) -> Option<f64> {
    VALENCES
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, v)| v)
}

pub(crate) fn booster(word: &str) -> Option<f64> {
    BOOSTERS.iter().find(|(w, _)| *w == word).map(|&(_, b)| b)
}

pub(crate) fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

pub(crate) fn is_contrast(word: &str) -> bool {
    CONTRASTS.contains(&word)
}
