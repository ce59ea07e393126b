//! Human labels for lowercase column names.

/// Ordered substitutions. Each applies to its first occurrence only, and
/// later rules see the output of earlier ones.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("participant", "Participant "),
    ("eventoccurrence", "Event Occurrence "),
    ("event", "Event "),
    ("survey", "Survey "),
    ("donations", "Donations"),
    ("donation", "Donation "),
    ("registration", "Registration "),
    ("milestone", "Milestone "),
    ("total", "Total "),
    ("userid", "User ID"),
    ("id", "ID"),
    ("email", "Email"),
    ("firstname", "First Name"),
    ("lastname", "Last Name"),
    ("dob", "Date Of Birth"),
    ("role", "Role"),
    ("phone", "Phone"),
    ("city", "City"),
    ("state", "State"),
    ("zip", "ZIP Code"),
    ("schooloremployer", "School Or Employer"),
    ("fieldofinterest", "Field Of Interest"),
    ("name", "Name"),
    ("type", "Type"),
    ("description", "Description"),
    ("recurrencepattern", "Recurrence Pattern"),
    ("defaultcapacity", "Default Capacity"),
    ("capacity", "Capacity"),
    ("location", "Location"),
    ("satisfaction", "Satisfaction"),
    ("usefulness", "Usefulness"),
    ("instructor", "Instructor"),
    ("recommendation", "Recommendation"),
    ("overall", "Overall"),
    ("score", " Score"),
    ("npsbucket", "NPS Bucket"),
    ("comments", "Comments"),
    ("submissiondate", "Submission Date"),
    ("title", "Title"),
    ("datetimestart", "Start Time"),
    ("datetimeend", "End Time"),
    ("date", "Date"),
    ("number", "Number"),
    ("amount", "Amount"),
    ("status", "Status"),
    ("attendedflag", "Attended"),
    ("userName", "Username"),
    ("password", "Password"),
    ("level", "Level"),
];

/// Formats a column name for display, e.g. `participantfirstname` becomes
/// `Participant First Name`.
pub fn format_name(column: &str) -> String {
    let mut label = column.to_string();
    for (pattern, replacement) in SUBSTITUTIONS {
        if label.contains(pattern) {
            label = label.replacen(pattern, replacement, 1);
        }
    }
    label.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_participant_columns() {
        assert_eq!(format_name("participantfirstname"), "Participant First Name");
        assert_eq!(format_name("participantemail"), "Participant Email");
        assert_eq!(format_name("participantdob"), "Participant Date Of Birth");
        assert_eq!(format_name("participantzip"), "Participant ZIP Code");
        assert_eq!(format_name("participantid"), "Participant ID");
    }

    #[test]
    fn formats_survey_scores() {
        assert_eq!(
            format_name("surveysatisfactionscore"),
            "Survey Satisfaction Score"
        );
        assert_eq!(format_name("surveynpsbucket"), "Survey NPS Bucket");
        assert_eq!(format_name("surveyoverallscore"), "Survey Overall Score");
    }

    #[test]
    fn formats_user_columns() {
        assert_eq!(format_name("username"), "Username");
        assert_eq!(format_name("userid"), "User ID");
        assert_eq!(format_name("password"), "Password");
        assert_eq!(format_name("level"), "Level");
    }

    #[test]
    fn formats_event_columns() {
        assert_eq!(format_name("eventname"), "Event Name");
        assert_eq!(format_name("eventtype"), "Event Type");
        assert_eq!(format_name("eventoccurrenceid"), "Event Occurrence ID");
        assert_eq!(format_name("eventdatetimestart"), "Event Start Time");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(format_name("xyz"), "xyz");
        assert_eq!(format_name(""), "");
    }

    proptest! {
        #[test]
        fn labels_are_trimmed(name in "[a-z]{0,24}") {
            let label = format_name(&name);
            prop_assert_eq!(label.trim(), label.as_str());
        }
    }
}
