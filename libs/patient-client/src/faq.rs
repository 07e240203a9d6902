pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqEntry {
    pub id: u32,
    pub category: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
}

pub static FAQ_ENTRIES: [FaqEntry; 8] = [
    FaqEntry {
        id: 1,
        category: "appointments",
        question: "How do I schedule an appointment?",
        answer: "You can schedule an appointment through our online portal by clicking the \"Schedule Appointment\" button. Select your preferred hospital, date, and available time slot. You can also call our helpline for assistance.",
    },
    FaqEntry {
        id: 2,
        category: "appointments",
        question: "How can I cancel or reschedule my appointment?",
        answer: "To cancel or reschedule, go to \"Upcoming Appointments\" in your dashboard. You can either click \"Cancel Appointment\" or \"Reschedule Appointment\". Please note that we require at least 24 hours notice for cancellations.",
    },
    FaqEntry {
        id: 3,
        category: "general",
        question: "What should I bring to my appointment?",
        answer: "Please bring a valid photo ID, your insurance card, a list of current medications, and any relevant medical records or test results. If this is your first visit, please arrive 15 minutes early to complete registration.",
    },
    FaqEntry {
        id: 4,
        category: "insurance",
        question: "What insurance plans do you accept?",
        answer: "We accept most major insurance plans including Medicare and Medicaid. Please contact our billing department or check with your insurance provider to verify coverage for specific procedures.",
    },
    FaqEntry {
        id: 5,
        category: "appointments",
        question: "How early should I arrive for my appointment?",
        answer: "Please arrive 15 minutes before your scheduled appointment time. For first-time visits, we recommend arriving 30 minutes early to complete necessary paperwork.",
    },
    FaqEntry {
        id: 6,
        category: "general",
        question: "What are your operating hours?",
        answer: "Our standard operating hours are Monday to Friday, 8:00 AM to 6:00 PM. Some locations offer extended hours and weekend appointments. Please check with your specific location for exact timings.",
    },
    FaqEntry {
        id: 7,
        category: "insurance",
        question: "Do you offer payment plans?",
        answer: "Yes, we offer flexible payment plans for patients who qualify. Please discuss with our billing department to learn more about our payment options and financial assistance programs.",
    },
    FaqEntry {
        id: 8,
        category: "general",
        question: "How do I access my medical records?",
        answer: "You can access your medical records through our patient portal. For printed copies, please submit a written request to our medical records department. Processing may take 5-7 business days.",
    },
];

/// `all` followed by each category in first-seen order.
pub fn categories() -> Vec<&'static str> {
    let mut categories = vec![ALL_CATEGORIES];
    for entry in FAQ_ENTRIES.iter() {
        if !categories.contains(&entry.category) {
            categories.push(entry.category);
        }
    }
    categories
}

pub fn filter(category: &str, query: &str) -> Vec<&'static FaqEntry> {
    let query = query.to_lowercase();

    FAQ_ENTRIES
        .iter()
        .filter(|entry| category == ALL_CATEGORIES || entry.category == category)
        .filter(|entry| {
            query.is_empty()
                || entry.question.to_lowercase().contains(&query)
                || entry.answer.to_lowercase().contains(&query)
        })
        .collect()
}
