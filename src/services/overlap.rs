//! Detección de solapamiento de fechas
//!
//! Predicado geométrico sobre intervalos de fechas inclusivos en ambos extremos.
//! No filtra por estado: quien llama entrega solo las reservas activas.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::booking::Booking;

/// `[a_start, a_end]` y `[b_start, b_end]` se solapan si y solo si
/// `a_start <= b_end && b_start <= a_end`.
pub fn overlaps(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Primera reserva que choca con el intervalo candidato
pub fn find_conflict<'a>(
    motorcycle_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    active_bookings: &'a [Booking],
) -> Option<&'a Booking> {
    let conflict = active_bookings
        .iter()
        .filter(|booking| booking.motorcycle_id == motorcycle_id)
        .find(|booking| overlaps(start, end, booking.start_date, booking.end_date));

    if let Some(booking) = conflict {
        debug!(
            motorcycle_id,
            booking_id = booking.id,
            %start,
            %end,
            "candidate interval overlaps existing booking"
        );
    }
    conflict
}

pub fn has_conflict(
    motorcycle_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    active_bookings: &[Booking],
) -> bool {
    find_conflict(motorcycle_id, start, end, active_bookings).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingStatus;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn booking(id: i64, start: u32, end: u32) -> Booking {
        Booking {
            id,
            motorcycle_id: 1,
            customer_name: "Sari".to_string(),
            customer_phone: "0811".to_string(),
            customer_address: "Bantul".to_string(),
            start_date: d(start),
            end_date: d(end),
            total_price: Decimal::ZERO,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_disjoint_intervals() {
        assert!(!overlaps(d(1), d(3), d(4), d(6)));
        assert!(!overlaps(d(4), d(6), d(1), d(3)));
    }

    #[test]
    fn test_shared_boundary_day_overlaps() {
        assert!(overlaps(d(10), d(12), d(12), d(14)));
        assert!(overlaps(d(12), d(14), d(10), d(12)));
    }

    #[test]
    fn test_containment_and_partial() {
        // contenido
        assert!(overlaps(d(5), d(20), d(10), d(12)));
        assert!(overlaps(d(10), d(12), d(5), d(20)));
        // parcial por cada lado
        assert!(overlaps(d(8), d(11), d(10), d(12)));
        assert!(overlaps(d(11), d(15), d(10), d(12)));
    }

    #[test]
    fn test_symmetry_and_reflexivity() {
        let days: Vec<u32> = (1..=8).collect();
        for &a0 in &days {
            for &a1 in days.iter().filter(|&&x| x >= a0) {
                assert!(overlaps(d(a0), d(a1), d(a0), d(a1)));
                for &b0 in &days {
                    for &b1 in days.iter().filter(|&&x| x >= b0) {
                        assert_eq!(
                            overlaps(d(a0), d(a1), d(b0), d(b1)),
                            overlaps(d(b0), d(b1), d(a0), d(a1)),
                        );
                        if a1 < b0 {
                            assert!(!overlaps(d(a0), d(a1), d(b0), d(b1)));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_has_conflict() {
        let existing = vec![booking(1, 1, 3), booking(2, 10, 12)];
        assert!(has_conflict(1, d(12), d(14), &existing));
        assert!(!has_conflict(1, d(13), d(15), &existing));
        assert!(!has_conflict(1, d(4), d(9), &existing));
        assert!(!has_conflict(1, d(4), d(9), &[]));
        // otra moto
        assert!(!has_conflict(2, d(1), d(3), &existing));
    }

    #[test]
    fn test_find_conflict_returns_offending_booking() {
        let existing = vec![booking(1, 1, 3), booking(2, 10, 12)];
        assert_eq!(find_conflict(1, d(9), d(10), &existing).map(|b| b.id), Some(2));
    }
}
