//! Block type remapping.
//!
//! Rules are applied to each block in declaration order, and each rule sees
//! the type left by the previous one, so `a -> b` followed by `b -> c` turns
//! an `a` block into `c`. Names are resolved through the palette at the point
//! of use: a rule whose `new_name` is unknown only fails once a block matches.

use blockmap_voxel::{BlockEncoding, Palette, PaletteError, RemappingRule};

/// Rewrites `blocks` in place and returns the number of type changes made.
///
/// On error, blocks rewritten before the failing lookup stay rewritten.
pub fn apply_remappings<P: Palette + ?Sized>(
    blocks: &mut [BlockEncoding],
    rules: &[RemappingRule],
    palette: &P,
) -> Result<usize, PaletteError> {
    if rules.is_empty() {
        return Ok(0);
    }

    let mut rewritten = 0;
    for block in blocks.iter_mut() {
        for rule in rules {
            if block.block == palette.index_of(&rule.old_name)? {
                block.block = palette.index_of(&rule.new_name)?;
                rewritten += 1;
            }
        }
    }
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmap_voxel::{BlockRegistry, BlockTypeId};

    fn palette() -> BlockRegistry {
        BlockRegistry::from_names(["bedrock", "stone", "dirt", "grass", "red_wool", "blue_wool"])
            .unwrap()
    }

    fn block(palette: &BlockRegistry, name: &str) -> BlockEncoding {
        BlockEncoding::new(0, 1, 0, palette.index_of(name).unwrap())
    }

    #[test]
    fn test_matching_blocks_rewritten() {
        let palette = palette();
        let mut blocks = vec![block(&palette, "stone"), block(&palette, "dirt")];
        let n = apply_remappings(
            &mut blocks,
            &[RemappingRule::new("stone", "grass")],
            &palette,
        )
        .unwrap();
        assert_eq!(n, 1);
        assert_eq!(blocks[0].block, palette.index_of("grass").unwrap());
        assert_eq!(blocks[1].block, palette.index_of("dirt").unwrap());
    }

    #[test]
    fn test_rules_chain_within_one_pass() {
        let palette = palette();
        let mut blocks = vec![block(&palette, "stone")];
        let rules = [
            RemappingRule::new("stone", "dirt"),
            RemappingRule::new("dirt", "grass"),
        ];
        let n = apply_remappings(&mut blocks, &rules, &palette).unwrap();
        assert_eq!(n, 2);
        assert_eq!(blocks[0].block, palette.index_of("grass").unwrap());
    }

    #[test]
    fn test_swap_rules_do_not_swap() {
        // Chaining means a naive swap collapses both colors into the first.
        let palette = palette();
        let mut blocks = vec![block(&palette, "red_wool"), block(&palette, "blue_wool")];
        let rules = [
            RemappingRule::new("red_wool", "blue_wool"),
            RemappingRule::new("blue_wool", "red_wool"),
        ];
        apply_remappings(&mut blocks, &rules, &palette).unwrap();
        let red = palette.index_of("red_wool").unwrap();
        assert_eq!(blocks[0].block, red);
        assert_eq!(blocks[1].block, red);
    }

    #[test]
    fn test_identity_rules_are_noop() {
        let palette = palette();
        let original: Vec<_> = ["stone", "dirt", "grass"]
            .iter()
            .map(|n| block(&palette, n))
            .collect();
        let mut blocks = original.clone();
        let rules = [
            RemappingRule::new("stone", "stone"),
            RemappingRule::new("grass", "grass"),
        ];
        apply_remappings(&mut blocks, &rules, &palette).unwrap();
        assert_eq!(blocks, original);
    }

    #[test]
    fn test_unknown_old_name_fails() {
        let palette = palette();
        let mut blocks = vec![block(&palette, "stone")];
        let result = apply_remappings(
            &mut blocks,
            &[RemappingRule::new("obsidian", "stone")],
            &palette,
        );
        assert_eq!(
            result,
            Err(PaletteError::UnknownBlockType("obsidian".to_string()))
        );
    }

    #[test]
    fn test_unknown_new_name_fails_only_on_match() {
        let palette = palette();
        let rules = [RemappingRule::new("dirt", "obsidian")];

        let mut untouched = vec![block(&palette, "stone")];
        assert_eq!(apply_remappings(&mut untouched, &rules, &palette), Ok(0));

        let mut matching = vec![block(&palette, "dirt")];
        assert!(apply_remappings(&mut matching, &rules, &palette).is_err());
    }

    #[test]
    fn test_no_rollback_on_failure() {
        let palette = palette();
        let mut blocks = vec![block(&palette, "stone"), block(&palette, "dirt")];
        let rules = [
            RemappingRule::new("stone", "grass"),
            RemappingRule::new("dirt", "obsidian"),
        ];
        assert!(apply_remappings(&mut blocks, &rules, &palette).is_err());
        assert_eq!(blocks[0].block, palette.index_of("grass").unwrap());
        assert_eq!(blocks[1].block, BlockTypeId(3));
    }
}
