//! English pluralization matching the rules Laravel's `Str::plural` uses.
//!
//! A word is checked against the uninflected list first, then against the
//! whole-word irregular table, then against the ordered suffix rules. The
//! first rule that matches wins; every comparison is case-insensitive.

use regex::Regex;
use std::sync::OnceLock;

const UNINFLECTED: &[&str] = &[
    r"\w+media", "advice", "aircraft", "amoyese", "art", "audio", "baggage", "bison", "borghese",
    "bream", "breeches", "britches", "buffalo", "butter", "cantus", "carp", "cattle", "chassis",
    "clippers", "clothing", "coal", "cod", "coitus", "compensation", "congoese", "contretemps",
    "coreopsis", "corps", "cotton", "data", "debris", "deer", "diabetes", "djinn", "education",
    "eland", "elk", "emoji", "equipment", "evidence", "faroese", "feedback", "fish", "flounder",
    "flour", "foochowese", "food", "furniture", "gallows", "genevese", "genoese", "gilbertese",
    "gold", "headquarters", "herpes", "hijinks", "homework", "hottentotese", "impatience",
    "information", "innings", "jackanapes", "jeans", "jedi", "kin", "kiplingese", "knowledge",
    "kongoese", "leather", "love", "lucchese", "luggage", "mackerel", "maltese", "management",
    "metadata", "mews", "money", "moose", "mumps", "music", "nankingese", "news", "nexus",
    "niasese", "nutrition", "offspring", "oil", "patience", "pekingese", "piedmontese", "pincers",
    "pistoiese", "plankton", "pliers", "pokemon", "police", "polish", "portuguese", "proceedings",
    "progress", "rabies", "rain", "research", "rhinoceros", "rice", "salmon", "sand", "sarawakese",
    "scissors", "sea[- ]bass", "series", "shavese", "shears", "sheep", "siemens", "silk", "sms",
    "soap", "social media", "spam", "species", "staff", "sugar", "swine", "talent", "toothpaste",
    "traffic", "travel", "trousers", "trout", "tuna", "us", "vermontese", "vinegar", "weather",
    "wenchowese", "wheat", "whiting", "wildebeest", "wood", "wool", "yengeese",
    // plural-only additions
    "people", "trivia", r"\w+ware", "media",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("atlas", "atlases"),
    ("axe", "axes"),
    ("beef", "beefs"),
    ("brother", "brothers"),
    ("cafe", "cafes"),
    ("canvas", "canvases"),
    ("chateau", "chateaux"),
    ("child", "children"),
    ("cookie", "cookies"),
    ("corpus", "corpuses"),
    ("cow", "cows"),
    ("criterion", "criteria"),
    ("curriculum", "curricula"),
    ("demo", "demos"),
    ("domino", "dominoes"),
    ("echo", "echoes"),
    ("foot", "feet"),
    ("fungus", "fungi"),
    ("ganglion", "ganglions"),
    ("gas", "gases"),
    ("genie", "genies"),
    ("genus", "genera"),
    ("goose", "geese"),
    ("graffito", "graffiti"),
    ("hippopotamus", "hippopotami"),
    ("hoof", "hoofs"),
    ("human", "humans"),
    ("iris", "irises"),
    ("larva", "larvae"),
    ("leaf", "leaves"),
    ("lens", "lenses"),
    ("loaf", "loaves"),
    ("man", "men"),
    ("medium", "media"),
    ("memorandum", "memoranda"),
    ("money", "monies"),
    ("mongoose", "mongooses"),
    ("motto", "mottoes"),
    ("move", "moves"),
    ("mythos", "mythoi"),
    ("niche", "niches"),
    ("niveau", "niveaux"),
    ("nucleus", "nuclei"),
    ("numen", "numina"),
    ("occiput", "occiputs"),
    ("octopus", "octopuses"),
    ("opus", "opuses"),
    ("ox", "oxen"),
    ("passerby", "passersby"),
    ("penis", "penises"),
    ("person", "people"),
    ("plateau", "plateaux"),
    ("runner-up", "runners-up"),
    ("safe", "safes"),
    ("sex", "sexes"),
    ("sieve", "sieves"),
    ("soliloquy", "soliloquies"),
    ("son-in-law", "sons-in-law"),
    ("syllabus", "syllabi"),
    ("testis", "testes"),
    ("thief", "thieves"),
    ("tooth", "teeth"),
    ("tornado", "tornadoes"),
    ("trilby", "trilbys"),
    ("turf", "turfs"),
    ("valve", "valves"),
    ("wave", "waves"),
    ("zombie", "zombies"),
];

const RULES: &[(&str, &str)] = &[
    ("(s)tatus$", "${1}tatuses"),
    ("(quiz)$", "${1}zes"),
    ("^(ox)$", "${1}en"),
    ("([m|l])ouse$", "${1}ice"),
    ("(matr|vert|ind)(ix|ex)$", "${1}ices"),
    ("(x|ch|ss|sh)$", "${1}es"),
    ("([^aeiouy]|qu)y$", "${1}ies"),
    ("(hive|gulf)$", "${1}s"),
    ("(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    ("sis$", "ses"),
    ("([ti])um$", "${1}a"),
    ("(tax)on$", "${1}a"),
    ("(c)riterion$", "${1}riteria"),
    ("(p)erson$", "${1}eople"),
    ("(m)an$", "${1}en"),
    ("(c)hild$", "${1}hildren"),
    ("(f)oot$", "${1}eet"),
    ("(buffal|her|potat|tomat|volcan)o$", "${1}oes"),
    (
        "(alumn|bacill|cact|foc|fung|nucle|radi|stimul|syllab|termin|vir)us$",
        "${1}i",
    ),
    ("us$", "uses"),
    ("(alias)$", "${1}es"),
    ("(analys|ax|cris|test|thes)is$", "${1}es"),
    ("s$", "s"),
    ("^$", ""),
    ("$", "s"),
];

/// Words Laravel never pluralizes, on top of the inflector's own list.
const UNCOUNTABLE: &[&str] = &["recommended", "related"];

struct Ruleset {
    uninflected: Regex,
    rules: Vec<(Regex, &'static str)>,
}

impl Ruleset {
    fn english() -> Self {
        let uninflected = Regex::new(&format!("(?i)^(?:{})$", UNINFLECTED.join("|")))
            .expect("uninflected patterns are valid");
        let rules = RULES
            .iter()
            .map(|(pattern, replacement)| {
                let regex =
                    Regex::new(&format!("(?i){}", pattern)).expect("plural rules are valid");
                (regex, *replacement)
            })
            .collect();
        Self { uninflected, rules }
    }
}

fn ruleset() -> &'static Ruleset {
    static RULESET: OnceLock<Ruleset> = OnceLock::new();
    RULESET.get_or_init(Ruleset::english)
}

/// Pluralize a single word without Laravel's case matching.
pub fn pluralize_word(word: &str) -> String {
    let rules = ruleset();

    if rules.uninflected.is_match(word) {
        return word.to_string();
    }

    let lower = word.to_lowercase();
    if let Some((_, to)) = IRREGULAR.iter().find(|(from, _)| *from == lower) {
        let first_upper = word.chars().next().is_some_and(char::is_uppercase);
        return if first_upper {
            crate::naming::ucfirst(to)
        } else {
            to.to_string()
        };
    }

    for (regex, replacement) in &rules.rules {
        if regex.is_match(word) {
            return regex.replace(word, *replacement).into_owned();
        }
    }

    word.to_string()
}

/// `Str::plural`: pluralize, then match the casing of the input.
pub fn plural(value: &str) -> String {
    let ends_in_word_char = value
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphanumeric() || ('\u{80}'..='\u{FFFF}').contains(&c));

    if !ends_in_word_char || UNCOUNTABLE.contains(&value.to_lowercase().as_str()) {
        return value.to_string();
    }

    match_case(&pluralize_word(value), value)
}

fn match_case(value: &str, comparison: &str) -> String {
    use crate::naming::{ucfirst, ucwords};

    let transforms: [fn(&str) -> String; 4] = [
        |s| s.to_lowercase(),
        |s| s.to_uppercase(),
        ucfirst,
        ucwords,
    ];

    for transform in transforms {
        if transform(comparison) == comparison {
            return transform(value);
        }
    }
    value.to_string()
}
