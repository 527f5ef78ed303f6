//! Embedded valence lexicon.
//!
//! AFINN-style integer valences in `-5..=5` for words that show up in
//! co-parenting correspondence. Keys are lowercase single words.

pub(crate) const LEXICON: &[(&str, i32)] = &[
    // Strongly negative
    ("abuse", -3),
    ("abusive", -3),
    ("hate", -3),
    ("hated", -3),
    ("hateful", -3),
    ("disgusting", -3),
    ("pathetic", -3),
    ("liar", -3),
    ("lying", -3),
    ("lied", -2),
    ("lies", -2),
    ("threat", -2),
    ("threaten", -2),
    ("threatened", -2),
    ("threatening", -2),
    ("horrible", -3),
    ("terrible", -3),
    ("awful", -3),
    ("worst", -3),
    ("stupid", -2),
    ("idiot", -3),
    ("ridiculous", -3),
    ("furious", -3),
    ("disgraceful", -3),
    ("neglect", -2),
    ("neglected", -2),
    ("endanger", -3),
    ("dangerous", -2),
    ("violent", -3),
    ("harass", -3),
    ("harassment", -3),
    ("harassing", -3),
    ("selfish", -3),
    ("irresponsible", -2),
    ("useless", -2),
    ("worthless", -2),
    ("damn", -4),
    ("crap", -3),
    ("shit", -4),
    ("hell", -4),
    // Moderately negative
    ("angry", -3),
    ("anger", -3),
    ("annoyed", -2),
    ("annoying", -2),
    ("upset", -2),
    ("sad", -2),
    ("sorry", -1),
    ("unfortunately", -2),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
    ("late", -1),
    ("missed", -2),
    ("miss", -2),
    ("problem", -2),
    ("problems", -2),
    ("issue", -1),
    ("issues", -1),
    ("concern", -1),
    ("concerned", -2),
    ("worried", -3),
    ("worry", -3),
    ("afraid", -2),
    ("scared", -2),
    ("sick", -2),
    ("hurt", -2),
    ("hurts", -2),
    ("pain", -2),
    ("cry", -1),
    ("crying", -2),
    ("blame", -2),
    ("blamed", -2),
    ("refuse", -2),
    ("refused", -2),
    ("refusing", -2),
    ("deny", -2),
    ("denied", -2),
    ("ignore", -1),
    ("ignored", -2),
    ("ignoring", -2),
    ("cancel", -1),
    ("cancelled", -1),
    ("canceled", -1),
    ("disappointed", -2),
    ("disappointing", -2),
    ("frustrated", -2),
    ("frustrating", -2),
    ("unacceptable", -2),
    ("wrong", -2),
    ("bad", -3),
    ("poor", -2),
    ("rude", -2),
    ("unfair", -2),
    ("confused", -2),
    ("confusing", -2),
    ("complain", -2),
    ("complaint", -2),
    ("demand", -1),
    ("demanded", -1),
    ("fight", -1),
    ("fighting", -2),
    ("argue", -2),
    ("argument", -2),
    ("stress", -1),
    ("stressed", -2),
    ("stressful", -2),
    ("tired", -2),
    ("lost", -3),
    ("lose", -3),
    ("penalty", -2),
    ("court", -1),
    ("violation", -2),
    ("violated", -2),
    ("dispute", -2),
    ("disagree", -2),
    ("doubt", -1),
    ("no", -1),
    ("never", -1),
    ("without", -1),
    ("unable", -1),
    ("difficult", -1),
    ("hard", -1),
    ("mess", -2),
    ("chaos", -2),
    ("delay", -1),
    ("delayed", -1),
    ("excuse", -1),
    ("excuses", -1),
    ("inappropriate", -2),
    // Mildly positive
    ("ok", 1),
    ("okay", 1),
    ("fine", 2),
    ("sure", 1),
    ("agree", 1),
    ("agreed", 1),
    ("yes", 1),
    ("please", 1),
    ("help", 2),
    ("helped", 2),
    ("helpful", 2),
    ("helping", 2),
    ("hope", 2),
    ("hopefully", 2),
    ("safe", 1),
    ("calm", 2),
    ("clear", 1),
    ("fair", 2),
    ("reasonable", 2),
    ("flexible", 2),
    ("support", 2),
    ("supported", 2),
    ("supportive", 2),
    ("cooperate", 2),
    ("cooperation", 2),
    ("cooperative", 2),
    ("interest", 1),
    ("interested", 2),
    ("like", 2),
    ("liked", 2),
    ("fun", 4),
    ("enjoy", 2),
    ("enjoyed", 2),
    ("share", 1),
    ("shared", 1),
    ("welcome", 2),
    ("resolve", 2),
    ("resolved", 2),
    ("solution", 1),
    ("improve", 2),
    ("improved", 2),
    ("improvement", 2),
    ("healthy", 2),
    ("ready", 1),
    ("care", 2),
    ("careful", 2),
    ("kind", 2),
    ("kindly", 2),
    ("comfortable", 2),
    ("accept", 1),
    ("accepted", 1),
    ("confirm", 2),
    ("confirmed", 2),
    ("appreciated", 2),
    ("respect", 2),
    ("trust", 1),
    ("patient", 2),
    ("patience", 2),
    ("positive", 2),
    ("relieved", 2),
    ("good", 3),
    ("nice", 3),
    ("glad", 3),
    ("pleased", 3),
    ("grateful", 3),
    ("thank", 2),
    ("thanks", 2),
    ("appreciate", 2),
    ("happy", 3),
    ("happiness", 3),
    ("proud", 2),
    ("safely", 1),
    // Strongly positive
    ("great", 3),
    ("love", 3),
    ("loved", 3),
    ("loves", 3),
    ("lovely", 3),
    ("wonderful", 4),
    ("fantastic", 4),
    ("amazing", 4),
    ("awesome", 4),
    ("excellent", 3),
    ("perfect", 3),
    ("beautiful", 3),
    ("brilliant", 4),
    ("excited", 3),
    ("exciting", 3),
    ("thrilled", 5),
    ("outstanding", 5),
    ("superb", 5),
];
