//! Per-landmark tallies of the visits recorded this session.

use crate::api::{Allocation, TouristVisit};

/// Visitor counts for one landmark, split by origin and sex.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VisitTally {
    pub landmark_id: i64,
    pub landmark_name: String,
    pub local_male: u32,
    pub local_female: u32,
    pub province_male: u32,
    pub province_female: u32,
    pub foreign_male: u32,
    pub foreign_female: u32,
    pub visits: usize,
}

impl VisitTally {
    pub fn total(&self) -> u32 {
        [
            self.local_female,
            self.province_male,
            self.province_female,
            self.foreign_male,
            self.foreign_female,
        ]
        .iter()
        .fold(self.local_male, |sum, n| sum.saturating_add(*n))
    }

    fn add(&mut self, visit: &TouristVisit) {
        let counts = &visit.counts;
        match visit.allocation {
            a if a.is_local() => {
                self.local_male = self.local_male.saturating_add(counts.male);
                self.local_female = self.local_female.saturating_add(counts.female);
            }
            Allocation::ForeignResidency => {
                self.foreign_male = self.foreign_male.saturating_add(counts.male);
                self.foreign_female = self.foreign_female.saturating_add(counts.female);
            }
            _ => {
                self.province_male = self.province_male.saturating_add(counts.male);
                self.province_female = self.province_female.saturating_add(counts.female);
            }
        }
        self.foreign_male = self.foreign_male.saturating_add(counts.foreign_male);
        self.foreign_female = self.foreign_female.saturating_add(counts.foreign_female);
        self.visits += 1;
    }
}

/// Return one tally per visited landmark, in order of first visit.
///
pub fn tally_visits(visits: &[TouristVisit]) -> Vec<VisitTally> {
    let mut tallies: Vec<VisitTally> = vec![];
    for visit in visits {
        let index = match tallies
            .iter()
            .position(|t| t.landmark_id == visit.visited_landmark)
        {
            Some(index) => index,
            None => {
                tallies.push(VisitTally {
                    landmark_id: visit.visited_landmark,
                    landmark_name: visit.landmark_name.to_owned(),
                    ..VisitTally::default()
                });
                tallies.len() - 1
            }
        };
        tallies[index].add(visit);
    }
    tallies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::VisitorCounts;

    fn visit(allocation: Allocation, landmark: i64, counts: [u32; 4]) -> TouristVisit {
        TouristVisit {
            allocation,
            nationality: None,
            visited_landmark: landmark,
            landmark_name: format!("Landmark {}", landmark),
            counts: VisitorCounts {
                male: counts[0],
                female: counts[1],
                foreign_male: counts[2],
                foreign_female: counts[3],
            },
            stay_duration: None,
        }
    }

    #[test]
    fn tallies_split_by_origin() {
        let visits = vec![
            visit(Allocation::LipaResidency, 1, [2, 1, 0, 0]),
            visit(Allocation::OtherProvinceWithForeign, 1, [1, 1, 1, 2]),
            visit(Allocation::ForeignResidency, 2, [1, 0, 0, 3]),
        ];
        let tallies = tally_visits(&visits);
        assert_eq!(tallies.len(), 2);

        let first = &tallies[0];
        assert_eq!((first.local_male, first.local_female), (2, 1));
        assert_eq!((first.province_male, first.province_female), (1, 1));
        assert_eq!((first.foreign_male, first.foreign_female), (1, 2));
        assert_eq!(first.total(), 8);
        assert_eq!(first.visits, 2);

        let second = &tallies[1];
        assert_eq!((second.foreign_male, second.foreign_female), (1, 3));
        assert_eq!(second.landmark_name, "Landmark 2");
    }

    #[test]
    fn tallies_saturate_instead_of_overflowing() {
        let visits = vec![
            visit(Allocation::LipaResidency, 1, [u32::MAX, 0, 0, 0]),
            visit(Allocation::LipaResidency, 1, [1, 1, 0, 0]),
        ];
        let tally = &tally_visits(&visits)[0];
        assert_eq!(tally.local_male, u32::MAX);
        assert_eq!(tally.total(), u32::MAX);
    }

    #[test]
    fn no_visits_no_tallies() {
        assert!(tally_visits(&[]).is_empty());
    }
}
