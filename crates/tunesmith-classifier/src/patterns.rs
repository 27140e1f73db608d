// SPDX-FileCopyrightText: 2026 Tunesmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static keyword tables driving use-case classification.
//!
//! Kept as data rather than code so categories can be extended without
//! touching the scoring algorithm. All matching is case-insensitive
//! substring matching against the lowercased input.

use tunesmith_core::UseCase;

/// One category's pattern groups. Each inner slice is an alternation: any
/// member matching counts toward that group's score.
pub(crate) struct CategoryPatterns {
    pub category: UseCase,
    pub groups: &'static [&'static [&'static str]],
}

/// Ordered classification tables, one entry per concrete category.
/// `UseCase::Other` has no patterns; it is the fallback, never a candidate.
pub(crate) const CATEGORY_PATTERNS: &[CategoryPatterns] = &[
    CategoryPatterns {
        category: UseCase::CreativeWriting,
        groups: &[
            &["story", "poem", "fiction", "novel", "screenplay"],
            &["short story", "creative", "imaginative", "creative writing"],
            &["character", "plot", "narrative", "worldbuilding"],
        ],
    },
    CategoryPatterns {
        category: UseCase::CodeGeneration,
        groups: &[
            &["write code", "write a function", "generate code", "implement"],
            &["function", "class", "module", "api", "script"],
            &["python", "javascript", "typescript", "rust", "java", "sql"],
        ],
    },
    CategoryPatterns {
        category: UseCase::Analysis,
        groups: &[
            &["analyze", "analyse", "analysis", "examine"],
            &["research", "evaluate", "assess", "investigate"],
            &["data", "trends", "metrics", "statistics"],
        ],
    },
    CategoryPatterns {
        category: UseCase::Summarization,
        groups: &[
            &["summarize", "summarise", "summary", "tl;dr", "tldr"],
            &["condense", "shorten", "key points", "main points"],
            &["brief overview", "digest", "recap"],
        ],
    },
    CategoryPatterns {
        category: UseCase::Conversation,
        groups: &[
            &["chat", "talk", "discuss", "conversation"],
            &["hello", "hi there", "how are you"],
            &["tell me about", "what do you think"],
        ],
    },
    CategoryPatterns {
        category: UseCase::Reasoning,
        groups: &[
            &["solve", "reasoning", "logic", "logical"],
            &["step by step", "think through", "prove", "deduce"],
            &["math", "puzzle", "riddle", "calculate"],
        ],
    },
    CategoryPatterns {
        category: UseCase::Debugging,
        groups: &[
            &["debug", "bug", "error", "broken"],
            &["not working", "crash", "exception", "stack trace", "traceback"],
            &["fix this", "what's wrong", "why does", "issue"],
        ],
    },
    CategoryPatterns {
        category: UseCase::Translation,
        groups: &[
            &["translate", "translation"],
            &["to english", "to spanish", "to french", "to german", "to japanese", "from english"],
            &["in another language", "localize", "localise"],
        ],
    },
];

/// Fixed context hint associations: (hint name, trigger keywords, weight).
/// Multiple hints may coexist on one input.
pub(crate) const CONTEXT_HINTS: &[(&str, &[&str], f64)] = &[
    ("creativity", &["creative", "write"], 0.8),
    ("technical", &["code", "program"], 0.9),
    ("analytical", &["analyze", "research"], 0.8),
    ("speed", &["fast", "quick"], 0.7),
];
