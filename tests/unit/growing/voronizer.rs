//! Tests for the separation-to-tessellation pipeline and its argument parsing

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use voronizer::GrowError;
    use voronizer::growing::separator::SeparatorConfig;
    use voronizer::growing::voronizer::{GeneratorMode, Voronizer, VoronizerConfig};

    fn block_and_dot() -> Array2<i32> {
        array![[5, 5, 0, 0], [5, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 5]]
    }

    fn pipeline(generators: GeneratorMode) -> Voronizer<i32> {
        Voronizer::new(VoronizerConfig {
            separator: SeparatorConfig {
                threshold: 1,
                background: 0,
            },
            generators,
        })
    }

    fn parameter_of(result: Result<VoronizerConfig<i32>, GrowError>) -> Option<&'static str> {
        match result {
            Err(GrowError::InvalidParameter { parameter, .. }) => Some(parameter),
            _ => None,
        }
    }

    // Tests separated regions used directly as generators cover the whole grid
    #[test]
    fn test_region_generators_fill_grid() {
        let output = pipeline(GeneratorMode::Regions)
            .run(&block_and_dot())
            .expect("pipeline succeeds");

        assert_eq!(output.regions, 2);
        assert!(output.labels.iter().all(|&label| label == 1 || label == 2));
        assert_eq!(output.labels.get([0, 0]), Some(&1));
        assert_eq!(output.labels.get([3, 3]), Some(&2));
        let members: usize = output.groups.values().map(Vec::len).sum();
        assert_eq!(members, 16);
        assert!(output.steps > 0);
    }

    // Tests centroid generators grow from one cell per region
    // Verified by using the region labels instead of centroids
    #[test]
    fn test_centroid_generators_fill_grid() {
        let output = pipeline(GeneratorMode::Centroids { radius: 0 })
            .run(&block_and_dot())
            .expect("pipeline succeeds");

        assert_eq!(output.regions, 2);
        assert_eq!(output.labels.get([0, 0]), Some(&1));
        assert_eq!(output.labels.get([3, 3]), Some(&2));
        assert!(output.labels.iter().all(|&label| label != 0));
        assert_eq!(output.groups.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    // Tests a grid whose only region is rejected yields no generators
    #[test]
    fn test_everything_rejected() {
        let voronizer = Voronizer::new(VoronizerConfig {
            separator: SeparatorConfig {
                threshold: 10,
                background: 0,
            },
            generators: GeneratorMode::Regions,
        });

        let output = voronizer
            .run(&Array2::from_elem((2, 2), 3))
            .expect("pipeline succeeds");

        assert_eq!(output.regions, 0);
        assert!(output.groups.is_empty());
        assert_eq!(output.labels, Array2::zeros((2, 2)));
    }

    // Tests empty argument strings select the defaults of each mode
    #[test]
    fn test_empty_args_select_defaults() {
        let regions = VoronizerConfig::<i32>::from_args("regions", "");
        assert_eq!(regions, Ok(VoronizerConfig::default()));

        let centroids = VoronizerConfig::<i32>::from_args("centroids", ",,1");
        assert_eq!(
            centroids.map(|config| config.generators),
            Ok(GeneratorMode::Centroids { radius: 1 })
        );
    }

    // Tests every field is parsed in order
    #[test]
    fn test_all_fields_parsed() {
        let config = VoronizerConfig::<i32>::from_args("centroids", "5, 3, 2")
            .expect("arguments are valid");

        assert_eq!(config.separator.threshold, 5);
        assert_eq!(config.separator.background, 3);
        assert_eq!(config.generators, GeneratorMode::Centroids { radius: 2 });
        assert_eq!(pipeline(config.generators).config().generators.name(), "centroids");
    }

    // Tests invalid arguments name the offending parameter
    // Verified by falling back to defaults on parse failure
    #[test]
    fn test_invalid_args_are_reported() {
        assert_eq!(
            parameter_of(VoronizerConfig::from_args("kmeans", "")),
            Some("mode")
        );
        assert_eq!(
            parameter_of(VoronizerConfig::from_args("regions", "abc")),
            Some("threshold")
        );
        assert_eq!(
            parameter_of(VoronizerConfig::from_args("regions", "1,2,3")),
            Some("args")
        );
        assert_eq!(
            parameter_of(VoronizerConfig::from_args("centroids", "1,2,-4")),
            Some("radius")
        );
    }

    // Tests a positive thickness selects rings and -1 keeps filled disks
    #[test]
    fn test_thickness_selects_rings() {
        let rings = VoronizerConfig::<i32>::from_args("centroids", "5,0,2,1");
        assert_eq!(
            rings.map(|config| config.generators),
            Ok(GeneratorMode::Rings {
                radius: 2,
                thickness: 1
            })
        );

        let disks = VoronizerConfig::<i32>::from_args("centroids", ",,2,-1");
        assert_eq!(
            disks.map(|config| config.generators),
            Ok(GeneratorMode::Centroids { radius: 2 })
        );

        assert_eq!(
            parameter_of(VoronizerConfig::from_args("centroids", ",,,0")),
            Some("thickness")
        );
        assert_eq!(
            parameter_of(VoronizerConfig::from_args("centroids", ",,,-3")),
            Some("thickness")
        );
    }

    // Tests line mode parses candidates and seed with their defaults
    #[test]
    fn test_line_mode_args() {
        let defaults = VoronizerConfig::<i32>::from_args("lines", "");
        assert_eq!(
            defaults.map(|config| config.generators),
            Ok(GeneratorMode::Lines {
                candidates: 25,
                seed: 0
            })
        );

        let config = VoronizerConfig::<i32>::from_args("lines", "1,0,4,7")
            .expect("arguments are valid");
        assert_eq!(
            config.generators,
            GeneratorMode::Lines {
                candidates: 4,
                seed: 7
            }
        );
        assert_eq!(config.generators.name(), "lines");

        assert_eq!(
            parameter_of(VoronizerConfig::from_args("lines", ",,0")),
            Some("candidates")
        );
        assert_eq!(
            parameter_of(VoronizerConfig::from_args("lines", "1,0,4,7,9")),
            Some("args")
        );
    }

    // Tests ring generators grow over the whole grid
    #[test]
    fn test_ring_generators_fill_grid() {
        let output = pipeline(GeneratorMode::Rings {
            radius: 1,
            thickness: 1,
        })
        .run(&block_and_dot())
        .expect("pipeline succeeds");

        assert_eq!(output.regions, 2);
        assert_eq!(output.labels.get([0, 1]), Some(&1));
        assert_eq!(output.labels.get([2, 3]), Some(&2));
        assert!(output.labels.iter().all(|&label| label != 0));
        assert_eq!(output.groups.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    // Tests five regions give one segment once three points stay unpaired
    #[test]
    fn test_line_generators_fill_grid() {
        let mut input = Array2::zeros((9, 9));
        for index in [[0, 0], [0, 8], [8, 0], [8, 8], [4, 4]] {
            if let Some(cell) = input.get_mut(index) {
                *cell = 5;
            }
        }

        let output = pipeline(GeneratorMode::Lines {
            candidates: 25,
            seed: 1,
        })
        .run(&input)
        .expect("pipeline succeeds");

        assert_eq!(output.regions, 5);
        assert!(output.labels.iter().all(|&label| label == 1));
        assert_eq!(output.groups.keys().copied().collect::<Vec<_>>(), vec![1]);
    }

    // Tests too few regions for a segment leave the grid without generators
    #[test]
    fn test_line_generators_need_enough_regions() {
        let output = pipeline(GeneratorMode::Lines {
            candidates: 25,
            seed: 0,
        })
        .run(&block_and_dot())
        .expect("pipeline succeeds");

        assert_eq!(output.regions, 2);
        assert!(output.labels.iter().all(|&label| label == 0));
        assert!(output.groups.is_empty());
    }

    // Tests a background outside the label type is refused
    #[test]
    fn test_background_must_fit_label_type() {
        let result = VoronizerConfig::<i8>::from_args("regions", "1,300");

        assert!(matches!(
            result,
            Err(GrowError::InvalidParameter {
                parameter: "background",
                ..
            })
        ));
    }
}
