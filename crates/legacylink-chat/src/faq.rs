//! Canned replies answered without calling the completion service.

const ENTRIES: &[(&str, &str)] = &[
  ("hello", "Hi! I'm LegacyLink Assistant. How can I help?"),
  ("hi", "Hello! Need help with alumni connections?"),
  ("help", "I can help with alumni network, events, posts, and mentorship."),
  ("events", "View upcoming alumni meetups, workshops, and networking events."),
  ("alumni", "Search alumni directory by year, industry, or location."),
  ("posts", "Share updates or browse alumni success stories."),
  ("login", "Choose student/alumni login from homepage."),
  ("register", "Contact admin for registration details."),
  ("mentorship", "Connect with alumni mentors in your field."),
  ("network", "Build connections through events and alumni directory."),
  ("opportunities", "Check job posts and internship opportunities from alumni."),
  ("contact", "Email support@legacylink or use contact form."),
  ("profile", "Update your profile in account settings."),
  ("batch", "Search alumni by graduation year in directory."),
  ("placement", "View placement updates and career opportunities."),
  ("feedback", "Share feedback through contact form."),
  ("bye", "Goodbye! Stay connected with LegacyLink!"),
];

/// Exact match on the trimmed, lowercased message.
pub fn lookup(message: &str) -> Option<&'static str> {
  let key = message.trim().to_lowercase();
  ENTRIES
    .iter()
    .find(|(k, _)| *k == key)
    .map(|(_, reply)| *reply)
}
