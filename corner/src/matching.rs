use bitarray::{BitArray, Hamming};
use corner_core::FeatureMatch;
use space::{Knn, LinearKnn};

/// AKAZE binary descriptor.
pub type Descriptor = BitArray<64>;

/// Matches every marker descriptor to its nearest frame descriptor, keeping
/// only matches that pass Lowe's ratio test.
///
/// A match is kept when the best Hamming distance is strictly less than
/// `ratio` times the second best one. Without a second candidate there is
/// nothing to compare against, so no match is made. The result is ordered by
/// marker feature index.
pub fn ratio_matching(
    marker: &[Descriptor],
    frame: &[Descriptor],
    ratio: f32,
) -> Vec<FeatureMatch> {
    let knn_frame = LinearKnn {
        metric: Hamming,
        iter: frame.iter(),
    };
    marker
        .iter()
        .enumerate()
        .filter_map(|(marker_ix, descriptor)| {
            let knn = knn_frame.knn(descriptor, 2);
            if knn.len() < 2 {
                return None;
            }
            let (best, second) = (&knn[0], &knn[1]);
            ((best.distance as f32) < ratio * second.distance as f32).then(|| FeatureMatch {
                marker: marker_ix,
                frame: best.index,
                distance: best.distance as u32,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A descriptor with the first `ones` bits set.
    fn descriptor(ones: usize) -> Descriptor {
        let mut bytes = [0u8; 64];
        for bit in 0..ones {
            bytes[bit / 8] |= 1 << (bit % 8);
        }
        BitArray::new(bytes)
    }

    #[test]
    fn distinct_match_is_kept() {
        let marker = [descriptor(0)];
        let frame = [descriptor(100), descriptor(2), descriptor(200)];
        let matches = ratio_matching(&marker, &frame, 0.7);
        assert_eq!(
            matches,
            vec![FeatureMatch {
                marker: 0,
                frame: 1,
                distance: 2
            }]
        );
    }

    #[test]
    fn ambiguous_match_is_rejected() {
        let marker = [descriptor(0)];
        let frame = [descriptor(10), descriptor(12)];
        assert!(ratio_matching(&marker, &frame, 0.7).is_empty());
    }

    #[test]
    fn single_candidate_is_rejected() {
        let marker = [descriptor(0)];
        assert!(ratio_matching(&marker, &[descriptor(1)], 0.7).is_empty());
        assert!(ratio_matching(&marker, &[], 0.7).is_empty());
    }

    #[test]
    fn matches_are_ordered_by_marker_feature() {
        let marker = [descriptor(300), descriptor(0), descriptor(150)];
        let frame = [descriptor(0), descriptor(150), descriptor(300)];
        let matches = ratio_matching(&marker, &frame, 0.7);
        let pairs: Vec<_> = matches.iter().map(|m| (m.marker, m.frame)).collect();
        assert_eq!(pairs, vec![(0, 2), (1, 0), (2, 1)]);
    }
}
