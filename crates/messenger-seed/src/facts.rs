//! Static text pools used to synthesize names and message content.

pub const FIRST_NAMES: &[&str] = &[
    "Alexei", "Maria", "Ivan", "Olga", "Dmitry", "Elena", "Sergei", "Anna", "Andrei", "Natalia",
];

pub const LAST_NAMES: &[&str] = &[
    "Ivanov", "Petrov", "Sidorov", "Kuznetsov", "Smirnov", "Popov", "Vasiliev", "Fedorov",
    "Mikhailov", "Novikov",
];

pub const CHAT_PREFIXES: &[&str] = &[
    "General",
    "Work",
    "Family",
    "Friends",
    "Project",
    "Team",
    "Support",
    "Development",
];

pub const CHAT_TOPICS: &[&str] = &["chat", "channel", "discussion", "group", "community"];

/// Upper bound (exclusive) of the numeric suffix appended to chat names.
pub const CHAT_SUFFIX_LIMIT: u32 = 1000;

pub const MESSAGE_CONTENTS: &[&str] = &[
    "Hi everyone!",
    "How are you?",
    "What's new?",
    "Great work!",
    "Let's discuss this",
    "I have a suggestion",
    "Agreed",
    "Interesting idea",
    "When can we meet?",
    "Thanks for the help!",
    "Have a nice day, all!",
    "Waiting for your comments",
    "Sending the file",
    "Checked it, everything works",
    "Need more information",
];
