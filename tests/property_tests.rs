use dupeblock::config::Config;
use dupeblock::duplicates::{BlockwiseComparator, ContentComparator, Matcher, TrackedFile};
use dupeblock::scanner::Walker;
use proptest::prelude::*;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

proptest! {
    #[test]
    fn test_groups_match_byte_equality(
        contents in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..8),
        block_size in 1u64..16,
    ) {
        let dir = TempDir::new().unwrap();
        for (i, content) in contents.iter().enumerate() {
            fs::write(dir.path().join(format!("file_{:02}", i)), content).unwrap();
        }

        let config = Config::default()
            .with_include_dir(dir.path().to_path_buf())
            .with_block_size(block_size)
            .with_min_file_size(-1);
        let walker = Walker::new(config);
        let mut matcher = Matcher::new(block_size);
        for candidate in walker.walk() {
            matcher.insert(candidate.unwrap()).unwrap();
        }

        let mut group_of = HashMap::new();
        for (index, group) in matcher.groups().iter().enumerate() {
            for path in group.paths() {
                let name = path.file_name().unwrap().to_string_lossy().into_owned();
                group_of.insert(name, index);
            }
        }

        // Every candidate lands in exactly one group, and two files share a
        // group exactly when their bytes are identical.
        prop_assert_eq!(group_of.len(), contents.len());
        for i in 0..contents.len() {
            for j in (i + 1)..contents.len() {
                let same_group = group_of[&format!("file_{:02}", i)]
                    == group_of[&format!("file_{:02}", j)];
                prop_assert_eq!(same_group, contents[i] == contents[j]);
            }
        }
    }

    #[test]
    fn test_comparator_agrees_with_byte_equality(
        content_a in prop::collection::vec(any::<u8>(), 0..256),
        content_b in prop::collection::vec(any::<u8>(), 0..256),
        block_size in 1u64..32,
    ) {
        let dir = TempDir::new().unwrap();
        let path_a = dir.path().join("a.bin");
        let path_b = dir.path().join("b.bin");
        fs::write(&path_a, &content_a).unwrap();
        fs::write(&path_b, &content_b).unwrap();

        let comparator = BlockwiseComparator::new(block_size);
        let mut a = TrackedFile::new(path_a, content_a.len() as u64);
        let mut b = TrackedFile::new(path_b, content_b.len() as u64);

        let equal = comparator.equal(&mut a, &mut b).unwrap();
        prop_assert_eq!(equal, content_a == content_b);
    }

    #[test]
    fn test_comparator_is_symmetric(
        content_a in prop::collection::vec(any::<u8>(), 0..128),
        content_b in prop::collection::vec(any::<u8>(), 0..128),
        block_size in 1u64..16,
    ) {
        let dir = TempDir::new().unwrap();
        let path_a = dir.path().join("a.bin");
        let path_b = dir.path().join("b.bin");
        fs::write(&path_a, &content_a).unwrap();
        fs::write(&path_b, &content_b).unwrap();

        let comparator = BlockwiseComparator::new(block_size);
        let mut a = TrackedFile::new(path_a, content_a.len() as u64);
        let mut b = TrackedFile::new(path_b, content_b.len() as u64);

        let forward = comparator.equal(&mut a, &mut b).unwrap();
        let backward = comparator.equal(&mut b, &mut a).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn test_file_always_equals_itself(
        content in prop::collection::vec(any::<u8>(), 0..256),
        block_size in 1u64..32,
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("self.bin");
        fs::write(&path, &content).unwrap();

        let comparator = BlockwiseComparator::new(block_size);
        let mut first = TrackedFile::new(path.clone(), content.len() as u64);
        let mut second = TrackedFile::new(path, content.len() as u64);

        prop_assert!(comparator.equal(&mut first, &mut second).unwrap());
    }

    #[test]
    fn test_size_mismatch_reads_nothing(
        content in prop::collection::vec(any::<u8>(), 0..128),
        extra in prop::collection::vec(any::<u8>(), 1..16),
        block_size in 1u64..32,
    ) {
        let dir = TempDir::new().unwrap();
        let path_a = dir.path().join("a.bin");
        let path_b = dir.path().join("b.bin");
        let mut longer = content.clone();
        longer.extend_from_slice(&extra);
        fs::write(&path_a, &content).unwrap();
        fs::write(&path_b, &longer).unwrap();

        let comparator = BlockwiseComparator::new(block_size);
        let mut a = TrackedFile::new(path_a, content.len() as u64);
        let mut b = TrackedFile::new(path_b, longer.len() as u64);

        prop_assert!(!comparator.equal(&mut a, &mut b).unwrap());
        prop_assert_eq!(a.cached_blocks(), 0);
        prop_assert_eq!(b.cached_blocks(), 0);
    }

    #[test]
    fn test_equal_files_cache_every_block_once(
        content in prop::collection::vec(any::<u8>(), 0..256),
        block_size in 1u64..32,
    ) {
        let dir = TempDir::new().unwrap();
        let path_a = dir.path().join("a.bin");
        let path_b = dir.path().join("b.bin");
        fs::write(&path_a, &content).unwrap();
        fs::write(&path_b, &content).unwrap();

        let comparator = BlockwiseComparator::new(block_size);
        let mut a = TrackedFile::new(path_a, content.len() as u64);
        let mut b = TrackedFile::new(path_b, content.len() as u64);

        prop_assert!(comparator.equal(&mut a, &mut b).unwrap());

        let expected = content.len().div_ceil(block_size as usize);
        prop_assert_eq!(a.cached_blocks(), expected);
        prop_assert_eq!(b.cached_blocks(), expected);
        prop_assert_eq!(a.cached_bytes() as usize, content.len());
        prop_assert_eq!(b.cached_bytes() as usize, content.len());
    }

    #[test]
    fn test_reads_stop_at_first_differing_block(
        content in prop::collection::vec(any::<u8>(), 1..128),
        flip in any::<prop::sample::Index>(),
        block_size in 1u64..16,
    ) {
        let position = flip.index(content.len());
        let mut mutated = content.clone();
        mutated[position] ^= 0xff;

        let dir = TempDir::new().unwrap();
        let path_a = dir.path().join("a.bin");
        let path_b = dir.path().join("b.bin");
        fs::write(&path_a, &content).unwrap();
        fs::write(&path_b, &mutated).unwrap();

        let comparator = BlockwiseComparator::new(block_size);
        let mut a = TrackedFile::new(path_a, content.len() as u64);
        let mut b = TrackedFile::new(path_b, mutated.len() as u64);

        prop_assert!(!comparator.equal(&mut a, &mut b).unwrap());

        // The single differing byte sits in block position / block_size, so
        // exactly the blocks up to and including it are read.
        let expected = position / block_size as usize + 1;
        prop_assert_eq!(a.cached_blocks(), expected);
        prop_assert_eq!(b.cached_blocks(), expected);
    }
}
