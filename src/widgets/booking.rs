//! Booking form helpers: the time-slot catalog and the earliest bookable date.

use chrono::NaiveDate;

/// One `<option>` of the time selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOption {
    pub value: String,
    pub label: String,
}

/// Placeholder first, then every slot in catalog order.
///
/// The catalog stands in for a real availability source, so the selected
/// service and date do not change the result.
pub fn time_slot_options(slots: &[String], placeholder: &str) -> Vec<SlotOption> {
    std::iter::once(SlotOption {
        value: String::new(),
        label: placeholder.to_string(),
    })
    .chain(slots.iter().map(|slot| SlotOption {
        value: slot.clone(),
        label: slot.clone(),
    }))
    .collect()
}

/// Value for the date input's `min` attribute.
pub fn min_booking_date(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

/// The nine hourly slots from 9:00 AM to 5:00 PM.
pub fn default_time_slots() -> Vec<String> {
    (9..=17)
        .map(|hour: u32| {
            let (display, meridiem) = match hour {
                12 => (12, "PM"),
                13.. => (hour - 12, "PM"),
                _ => (hour, "AM"),
            };
            format!("{display}:00 {meridiem}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slots() {
        assert_eq!(
            default_time_slots(),
            vec![
                "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM",
                "4:00 PM", "5:00 PM"
            ]
        );
    }

    #[test]
    fn test_options_lead_with_placeholder() {
        let options = time_slot_options(&default_time_slots(), "Select Time");
        assert_eq!(options.len(), 10);
        assert_eq!(options[0].value, "");
        assert_eq!(options[0].label, "Select Time");
        assert_eq!(options[1].value, "9:00 AM");
        assert_eq!(options[9].label, "5:00 PM");
    }

    #[test]
    fn test_min_date_format() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(min_booking_date(day), "2026-03-07");
    }
}
