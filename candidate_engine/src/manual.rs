/*!

This is the long-form manual for `candidate_engine` and `legidash`.

## Input formats

The candidate list can be read from the following formats:
* `json` a JSON array of candidate objects (default)
* `csv` a delimited text file with a header row
* `xlsx` an Excel workbook

Several sources can be listed in a configuration file. Their candidates are
read one after the other, in the order of the configuration.

### Fields

All the formats use the same field names, taken from the published
candidate lists:

| Field              | Meaning                                        |
|--------------------|------------------------------------------------|
| `id`               | identifier of the record (display only)        |
| `prenomCandidat`   | given name                                     |
| `nomCandidat`      | family name                                    |
| `civiliteCandidat` | civility (`M.`, `Mme`)                         |
| `departement`      | department                                     |
| `circonscription`  | constituency inside the department             |
| `numPanneau`       | panel number (ballot position)                 |
| `codeNuance`       | short code of the political nuance             |
| `libelleNuance`    | label of the political nuance                  |

Every field is optional. Missing values are shown as empty text and are not
counted as a category in the charts. Numbers (such as `numPanneau: 3`) are
accepted wherever text is expected. When `id` is missing, an identifier is
derived from the file name and the position of the record.

The nuance code and the nuance label are independent: the same label may be
used by several codes and the other way around. Both can be used as filters.

### `json`

```json
[
  {
    "id": 1,
    "prenomCandidat": "Marie",
    "nomCandidat": "Dupont",
    "civiliteCandidat": "Mme",
    "departement": "Ain",
    "circonscription": "1ère circonscription",
    "numPanneau": 3,
    "codeNuance": "ENS",
    "libelleNuance": "Ensemble"
  }
]
```

Elements of the array that are not objects are skipped with a warning.

### `csv`

The first row holds the field names above, in any order. Unknown columns are
ignored. The default delimiter is `;`, which is the usual choice for French
open data files; it can be changed with the `delimiter` option.

### `xlsx`

The first row of the worksheet holds the field names. The first worksheet is
read unless `excelWorksheetName` is given.

## Views

* `/` (or `home`): the list of candidates, with a search on the names and
  filters on the department, the nuance code and the nuance label.
* `/chart` (or `bar`): the number of candidates per nuance label, as a bar
  chart, and the list of candidates of the selected label.
* `/pie` (or `pie`): the number of candidates per department and nuance code.

Lists are split in pages (5 candidates per page by default). Changing a filter
or the search text goes back to the first page.

Colors are assigned to nuances in the order in which they first appear in the
data, so a nuance keeps its color from one view to the next and when filters
change.

## Configuration file

```json
{
  "outputSettings": { "title": "Législatives 2024" },
  "dataSources": [
    { "provider": "json", "filePath": "results.json" },
    { "provider": "csv", "filePath": "outre-mer.csv", "delimiter": ";" }
  ],
  "display": { "pageSize": 5, "visiblePages": 5 }
}
```

Paths are relative to the directory of the configuration file.

Other keys:
* `outputSettings.outputPath`: where to write the JSON summary of the view
  (`stdout` prints it)
* `dataSources[].excelWorksheetName`: the worksheet of an `xlsx` source
* `dataSources[].retries` (default 0): extra attempts after a failed read
* `display.palette`: the chart colors, as `#RRGGBB` strings
* `display.seriesLabel`: the name of the counted series
* `display.barWidth` (default 40): the width of the longest bar in the terminal

The command line options take precedence over the configuration file.

*/
